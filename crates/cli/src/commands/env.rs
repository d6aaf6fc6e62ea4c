//! List the environment variables a schema reads.

use anyhow::Result;
use layerconf::{EnvBinding, env_bindings};

use crate::schema::ServiceConfig;

pub fn run(app: &str, dotenv: bool) -> Result<()> {
    let bindings = env_bindings::<ServiceConfig>(app);
    if dotenv {
        print!("{}", render_dotenv(&bindings));
    } else {
        print!("{}", render_table(&bindings));
    }
    Ok(())
}

fn flags(binding: &EnvBinding) -> String {
    let mut flags = Vec::new();
    if binding.required {
        flags.push("required");
    }
    if binding.secret {
        flags.push("secret");
    }
    flags.join(",")
}

fn render_table(bindings: &[EnvBinding]) -> String {
    let width = bindings
        .iter()
        .map(|b| b.key.len())
        .max()
        .unwrap_or(0)
        .max("VARIABLE".len());

    let mut out = format!("{:<width$}  {:<18}  {:<10}  FLAGS\n", "VARIABLE", "TYPE", "DEFAULT");
    for binding in bindings {
        out.push_str(&format!(
            "{:<width$}  {:<18}  {:<10}  {}\n",
            binding.key,
            binding.kind.to_string(),
            binding.default.unwrap_or("-"),
            flags(binding)
        ));
    }
    out
}

/// `.env` template with defaults filled in.
///
/// Only required top-level keys are left uncommented; list entries are shown
/// for index 0.
fn render_dotenv(bindings: &[EnvBinding]) -> String {
    let mut out = String::new();
    for binding in bindings {
        let flags = flags(binding);
        if flags.is_empty() {
            out.push_str(&format!("# {}\n", binding.kind));
        } else {
            out.push_str(&format!("# {} ({flags})\n", binding.kind));
        }
        let comment = if binding.required && !binding.key.contains("<N>") {
            ""
        } else {
            "# "
        };
        out.push_str(&format!(
            "{comment}{}={}\n",
            binding.key.replace("<N>", "0"),
            binding.default.unwrap_or("")
        ));
    }
    out
}
