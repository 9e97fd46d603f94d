//! Interactive setup wizard
//!
//! Drives [`SetupFlow`] from line-based input. Empty input takes the value
//! shown in brackets.

use std::fmt::Display;
use std::io::{BufRead, Write};
use std::str::FromStr;

use anyhow::bail;
use application::{SetupFlow, SetupOutcome, SetupStep, UserStepInput};
use domain::{EntityId, GeoLocation};

/// Ask until the input parses; `None` as default makes the value required
fn prompt<T, R, W>(input: &mut R, output: &mut W, label: &str, default: Option<&T>) -> anyhow::Result<T>
where
    T: FromStr + Display + Clone,
    T::Err: Display,
    R: BufRead,
    W: Write,
{
    loop {
        match default {
            Some(default) => write!(output, "{label} [{default}]: ")?,
            None => write!(output, "{label}: ")?,
        }
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            bail!("input closed before the wizard finished");
        }

        let line = line.trim();
        if line.is_empty() {
            if let Some(default) = default {
                return Ok(default.clone());
            }
            writeln!(output, "  a value is required")?;
            continue;
        }

        match line.parse() {
            Ok(value) => return Ok(value),
            Err(e) => writeln!(output, "  {e}")?,
        }
    }
}

/// Run all wizard steps
pub fn run_wizard<R: BufRead, W: Write>(
    mut flow: SetupFlow,
    input: &mut R,
    output: &mut W,
) -> anyhow::Result<SetupOutcome> {
    let defaults = flow.defaults();

    while flow.step() == SetupStep::User {
        let name: String = prompt(input, output, "Name", defaults.name.as_ref())?;
        let interval_minutes: u32 = prompt(
            input,
            output,
            "Interval in minutes",
            Some(&defaults.interval_minutes),
        )?;
        let schedule: EntityId =
            prompt(input, output, "Schedule entity", defaults.schedule.as_ref())?;

        if let Err(e) = flow.submit_user(UserStepInput {
            name,
            interval_minutes,
            schedule,
        }) {
            writeln!(output, "  {e}")?;
        }
    }

    let origin: GeoLocation = prompt(
        input,
        output,
        "Origin (latitude, longitude)",
        Some(&defaults.origin),
    )?;
    flow.submit_origin(origin)?;

    let destination: GeoLocation = prompt(
        input,
        output,
        "Destination (latitude, longitude)",
        Some(&defaults.destination),
    )?;
    Ok(flow.submit_destination(destination)?)
}
