use owo_colors::OwoColorize;

pub struct CommandSummary {
    pub prefix: String,
    pub message: String,
}

impl CommandSummary {
    pub fn format(updated: usize, failure: usize, dry_run: bool) -> Self {
        let verb = if dry_run { "would be updated" } else { "updated" };
        match (updated, failure) {
            (_, f) if f > 0 => Self {
                prefix: "✗".red().to_string(),
                message: format!("{} {}, {} failed", updated.green(), verb, f.red()),
            },
            (u, _) if u > 0 => Self {
                prefix: "✓".green().to_string(),
                message: format!("{} texture(s) {}", u.green(), verb),
            },
            _ => Self {
                prefix: "•".yellow().to_string(),
                message: "All textures already match the policy".to_string(),
            },
        }
    }
}

impl std::fmt::Display for CommandSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.prefix, self.message)
    }
}
