//! Prompt command registry and documentation.

/// A prompt command definition.
#[derive(Debug, Clone)]
pub struct CommandHelp {
    pub usage: &'static str,
    pub description: &'static str,
}

impl CommandHelp {
    pub const fn new(usage: &'static str, description: &'static str) -> Self {
        Self { usage, description }
    }
}

/// Registry of all prompt commands.
pub struct HelpRegistry;

impl HelpRegistry {
    /// Get all registered commands.
    pub fn all() -> Vec<CommandHelp> {
        vec![
            CommandHelp::new("show", "Redraw the current tab"),
            CommandHelp::new("tab <Big Board|QB|RB|WR|TE>", "Switch tab"),
            CommandHelp::new("theme", "Toggle dark/light theme"),
            CommandHelp::new("add-tier", "Append a tier"),
            CommandHelp::new("del-tier <tier>", "Delete a tier, moving its players up"),
            CommandHelp::new("title <tier> <text>", "Rename a tier"),
            CommandHelp::new("note <tier> <text>", "Set a tier note"),
            CommandHelp::new("add <tier>", "Add a blank player to a tier"),
            CommandHelp::new("name <player> <text>", "Rename a player"),
            CommandHelp::new("pos <player> <QB|RB|WR|TE>", "Set a player's position"),
            CommandHelp::new("notes <player> <text>", "Set player notes"),
            CommandHelp::new("meta <player> <zap|category|rp> <v>", "Set a position field"),
            CommandHelp::new("del <player>", "Remove a player"),
            CommandHelp::new("mv <player> <player|tier>", "Drop a player on a row or tier"),
            CommandHelp::new("export [file]", "Write the board JSON"),
            CommandHelp::new("import <file>", "Replace the board from a file"),
            CommandHelp::new("copy", "Copy the board JSON to the clipboard"),
            CommandHelp::new("paste <json>", "Replace the board from JSON text"),
            CommandHelp::new("reset", "Restore the sample board"),
            CommandHelp::new("help", "Show this list"),
            CommandHelp::new("quit", "Exit"),
        ]
    }

    /// Render the command list.
    pub fn format_all() -> String {
        let mut out = String::from("\n=== Commands ===\n");
        for command in Self::all() {
            out.push_str(&format!("  {:40} {}\n", command.usage, command.description));
        }
        out.push_str("\n  <tier> is t1, t2, ... or a tier id; <player> is #rank or a player id\n");
        out
    }

    /// Print all commands to console.
    pub fn print_all() {
        println!("{}", Self::format_all());
    }
}
