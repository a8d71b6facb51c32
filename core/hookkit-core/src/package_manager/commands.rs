//! Command synthesis for a resolved package manager.

use super::registry::{PackageManagerDescriptor, PackageManagerName};
use super::resolver::Resolution;

impl PackageManagerDescriptor {
    /// Command that runs `script`. The well-known scripts use the manager's
    /// own template; anything else is `<run> <script>`.
    pub fn run_command(&self, script: &str) -> String {
        match script {
            "install" => self.install_cmd.to_string(),
            "test" => self.test_cmd.to_string(),
            "build" => self.build_cmd.to_string(),
            "dev" => self.dev_cmd.to_string(),
            other => format!("{} {}", self.run_cmd, other),
        }
    }

    /// Command that executes a package binary, e.g. `pnpm dlx prettier --check`.
    pub fn exec_command(&self, binary: &str, args: &str) -> String {
        if args.is_empty() {
            format!("{} {}", self.exec_cmd, binary)
        } else {
            format!("{} {} {}", self.exec_cmd, binary, args)
        }
    }
}

impl Resolution {
    pub fn run_command(&self, script: &str) -> String {
        self.config.run_command(script)
    }

    pub fn exec_command(&self, binary: &str, args: &str) -> String {
        self.config.exec_command(binary, args)
    }
}

/// Regex alternation matching any supported manager's invocation of
/// `action`, for recognizing package manager commands in free text.
///
/// Each manager contributes its own syntax: pnpm may omit `run`, yarn's
/// install may omit the subcommand.
pub fn command_pattern(action: &str) -> String {
    let patterns: [String; 4] = match action {
        "dev" => [
            "npm run dev".into(),
            "pnpm( run)? dev".into(),
            "yarn dev".into(),
            "bun run dev".into(),
        ],
        "install" => [
            "npm install".into(),
            "pnpm install".into(),
            "yarn( install)?".into(),
            "bun install".into(),
        ],
        "test" => [
            "npm test".into(),
            "pnpm test".into(),
            "yarn test".into(),
            "bun test".into(),
        ],
        "build" => [
            "npm run build".into(),
            "pnpm( run)? build".into(),
            "yarn build".into(),
            "bun run build".into(),
        ],
        other => [
            format!("npm run {}", other),
            format!("pnpm( run)? {}", other),
            format!("yarn {}", other),
            format!("bun run {}", other),
        ],
    };
    format!("({})", patterns.join("|"))
}

/// Guidance shown when no explicit preference chose the manager.
pub fn selection_prompt(available: &[PackageManagerName], current: PackageManagerName) -> String {
    let mut message = String::from("[PackageManager] Available package managers:\n");

    for pm in available {
        let indicator = if *pm == current { " (current)" } else { "" };
        message.push_str(&format!("  - {}{}\n", pm, indicator));
    }

    message.push_str("\nTo set your preferred package manager:\n");
    message.push_str("  - Global: Set CLAUDE_PACKAGE_MANAGER environment variable\n");
    message.push_str(
        "  - Or add to ~/.claude/package-manager.json: {\"packageManager\": \"pnpm\"}\n",
    );
    message.push_str("  - Or add to package.json: {\"packageManager\": \"pnpm@8\"}\n");
    message
}
