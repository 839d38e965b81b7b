use colored::*;
use promptlab_core::{Config, HistoryRow, PanelState, Provider};

pub fn print_response(text: &str) {
    if text.starts_with("Error: ") {
        eprintln!("{}", text.red());
    } else {
        println!("{}", text);
    }
}

pub fn print_row(row: &HistoryRow) {
    println!("\n{}", "📋 History".bold().blue());
    println!("{} {}", "Model:".bold(), row.model);
    if !row.time_elapsed.is_empty() {
        println!("{} {}", "Time:".bold(), row.time_elapsed.yellow());
    }
    println!("{}", "Prompt:".bold());
    for line in row.prompt.lines() {
        println!("  {}", line.dimmed());
    }
    println!("{}", "Response:".bold());
    println!("{}", row.response.green());
}

pub fn print_panel_state(state: &PanelState) {
    match state {
        PanelState::Success(data) => {
            println!("{}", "✅ Interface Generated Successfully!".bold().green());
            println!("{} {}", "Model Used:".bold(), data.model);
            println!(
                "{} {}",
                "Generation Time:".bold(),
                promptlab_core::InterfacePanel::generation_time(data)
            );
            println!(
                "{} {}",
                "Lines of Code:".bold(),
                promptlab_core::InterfacePanel::line_count(data)
            );
        }
        PanelState::Error(message) => {
            eprintln!("{}", "❌ Generation Failed".bold().red());
            eprintln!("{}", message);
        }
        PanelState::Idle | PanelState::Submitting => {}
    }
}

fn mask(key: Option<&str>) -> String {
    match key {
        Some(key) if key.chars().count() > 8 => {
            let chars: Vec<char> = key.chars().collect();
            let head: String = chars[..4].iter().collect();
            let tail: String = chars[chars.len() - 4..].iter().collect();
            format!("{}…{}", head, tail)
        }
        Some(_) => "set".to_string(),
        None => "not set".dimmed().to_string(),
    }
}

pub fn print_config(config: &Config) {
    println!("{}", "⚙️  Configuration".bold().blue());
    println!("{} {}", "Backend:".bold(), config.backend_url());
    println!("{} {}", "Default model:".bold(), config.default_model());
    for provider in Provider::all() {
        println!(
            "{} {}",
            format!("{} key:", provider.display_name()).bold(),
            mask(config.api_key(provider))
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_hides_middle_of_key() {
        assert_eq!(mask(Some("sk-abcdefghijkl")), "sk-a…ijkl");
        assert_eq!(mask(Some("short")), "set");
    }
}
