use std::io::{self, BufRead, Write};

const GENERATE_PROMPT: &str = "No script files found. Do you want to generate them?";

/// Asks before generating scripts for `stream`. Anything but an explicit yes
/// declines.
pub fn confirm_generate() -> io::Result<bool> {
    let stdin = io::stdin();
    confirm_generate_from(&mut stdin.lock(), &mut io::stdout())
}

fn confirm_generate_from(input: &mut impl BufRead, output: &mut impl Write) -> io::Result<bool> {
    prompt_confirm(input, output, GENERATE_PROMPT, Some(false))
}

pub fn prompt_confirm(
    input: &mut impl BufRead,
    output: &mut impl Write,
    prompt: &str,
    default: Option<bool>,
) -> io::Result<bool> {
    let mut line = String::new();

    loop {
        line.clear();

        match default {
            Some(true) => write!(output, "{} (Y/n): ", prompt)?,
            Some(false) | None => write!(output, "{} (y/N): ", prompt)?,
        }
        output.flush()?;

        if input.read_line(&mut line)? == 0 {
            return Ok(default.unwrap_or(false));
        }

        match line.trim().to_uppercase().as_str() {
            "Y" | "YES" => return Ok(true),
            "N" | "NO" => return Ok(false),
            "" => match default {
                Some(default) => return Ok(default),
                None => continue,
            },
            _ => continue,
        }
    }
}
