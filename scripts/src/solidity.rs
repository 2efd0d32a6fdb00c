//! Definitions of the Solidity contract interfaces called by the scripts

// The `sol!` expansions carry no docs
#![allow(missing_docs, clippy::missing_docs_in_private_items)]

use alloy::{network::Ethereum, providers::DynProvider, sol};

/// The provider type through which the scripts reach the chain
pub type Client = DynProvider<Ethereum>;

/// A BEETS token instance using the default generics
pub type BeetsToken = IBeethovenxToken::IBeethovenxTokenInstance<Client>;

/// A timelock instance using the default generics
pub type Timelock = ITimelock::ITimelockInstance<Client>;

/// A master chef instance using the default generics
pub type MasterChef = IBeethovenxMasterChef::IBeethovenxMasterChefInstance<Client>;

sol! {
    #[sol(rpc)]
    interface IBeethovenxToken {
        function owner() external view returns (address);
        function transferOwnership(address newOwner) external;
        function mint(address to, uint256 amount) external;
        function balanceOf(address account) external view returns (uint256);
    }

    #[sol(rpc)]
    interface ITimelock {
        function delay() external view returns (uint256);
        function queuedTransactions(bytes32 txHash) external view returns (bool);
        function queueTransaction(address target, uint256 value, string calldata signature, bytes calldata data, uint256 eta) external returns (bytes32);
        function executeTransaction(address target, uint256 value, string calldata signature, bytes calldata data, uint256 eta) external payable returns (bytes memory);
    }

    #[sol(rpc)]
    interface IBeethovenxMasterChef {
        function owner() external view returns (address);
        function transferOwnership(address newOwner) external;
        function add(uint256 allocPoint, address lpToken, address rewarder) external;
        function poolLength() external view returns (uint256);
        function poolInfo(uint256 pid) external view returns (uint256 accBeetsPerShare, uint256 lastRewardBlock, uint256 allocPoint);
        function lpTokens(uint256 pid) external view returns (address);
        function rewarder(uint256 pid) external view returns (address);
    }
}
