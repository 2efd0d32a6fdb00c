//! Interactive prompts answered by the operator on the terminal

use std::io::{self, BufRead, Write};

use crate::errors::ScriptError;

/// Print `prompt` and read a single trimmed line of input
fn prompt_for_input(prompt: &str) -> Result<String, ScriptError> {
    print!("{}: ", prompt);
    io::stdout()
        .flush()
        .map_err(|e| ScriptError::Prompt(e.to_string()))?;

    let mut input = String::new();
    let read = io::stdin()
        .lock()
        .read_line(&mut input)
        .map_err(|e| ScriptError::Prompt(e.to_string()))?;
    if read == 0 {
        return Err(ScriptError::Prompt("stdin closed".to_string()));
    }

    Ok(input.trim().to_string())
}

/// Parses a yes/no answer, where an empty answer is a yes
pub(crate) fn parse_confirmation(input: &str) -> Option<bool> {
    match input.to_lowercase().as_str() {
        "" | "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

/// Prompt the operator to confirm, defaulting to yes
pub(crate) fn prompt_for_confirm(prompt: &str) -> Result<bool, ScriptError> {
    loop {
        let input = prompt_for_input(&format!("{} (Y/n)", prompt))?;
        match parse_confirmation(&input) {
            Some(answer) => return Ok(answer),
            None => println!("Please answer y or n."),
        }
    }
}

/// Prompt the operator for a u64, using `default` on an empty answer
pub(crate) fn prompt_for_u64(prompt: &str, default: u64) -> Result<u64, ScriptError> {
    loop {
        let input = prompt_for_input(&format!("{} [{}]", prompt, default))?;

        if input.is_empty() {
            return Ok(default);
        }

        match input.parse::<u64>() {
            Ok(value) => return Ok(value),
            Err(_) => println!("Invalid value. Please enter a non-negative integer."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::parse_confirmation;

    #[test]
    fn test_parse_confirmation() {
        assert_eq!(parse_confirmation(""), Some(true));
        assert_eq!(parse_confirmation("Y"), Some(true));
        assert_eq!(parse_confirmation("no"), Some(false));
        assert_eq!(parse_confirmation("maybe"), None);
    }
}
