//! setup-pm: inspect and persist the preferred package manager.
//!
//! ```text
//! setup-pm --detect          show the resolution and every signal behind it
//! setup-pm --list            show supported managers and install status
//! setup-pm --global pnpm     save ~/.claude/package-manager.json
//! setup-pm --project bun     save ./.claude/package-manager.json
//! setup-pm pnpm              same as --global pnpm
//! ```
//!
//! Exit codes: 0 on success, help, detect and list; 1 on an unknown manager,
//! an unknown option or a missing option value.

use std::env;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use hookkit::logging;
use hookkit_core::package_manager::{
    detect_from_lock_file, detect_from_package_json, set_preferred_package_manager,
    set_project_package_manager,
};
use hookkit_core::{
    CommandProbe, HookEnv, PackageManagerName, PackageManagerResolver, StorageConfig, SystemProbe,
};

#[derive(Parser, Debug)]
#[command(name = "setup-pm")]
#[command(disable_help_flag = true)]
struct Cli {
    /// Detect and show the current package manager
    #[arg(long)]
    detect: bool,

    /// List available package managers
    #[arg(long)]
    list: bool,

    /// Set the global preference
    #[arg(long, value_name = "PM")]
    global: Option<String>,

    /// Set the preference for the current project
    #[arg(long, value_name = "PM")]
    project: Option<String>,

    /// Show help
    #[arg(short, long)]
    help: bool,

    /// Package manager to set globally
    #[arg(value_name = "PM")]
    name: Option<String>,
}

#[derive(Debug, PartialEq, Eq)]
enum Action {
    Help,
    Detect,
    List,
    SetGlobal(String),
    SetProject(String),
}

impl Cli {
    /// Help beats detect beats list beats the setters.
    fn action(self) -> Action {
        if self.help {
            Action::Help
        } else if self.detect {
            Action::Detect
        } else if self.list {
            Action::List
        } else if let Some(name) = self.global {
            Action::SetGlobal(name)
        } else if let Some(name) = self.project {
            Action::SetProject(name)
        } else if let Some(name) = self.name {
            Action::SetGlobal(name)
        } else {
            Action::Help
        }
    }
}

struct Setup {
    storage: StorageConfig,
    env_override: Option<String>,
    cwd: PathBuf,
    probe: Box<dyn CommandProbe>,
}

impl Setup {
    fn from_env() -> Result<Self, String> {
        Ok(Self {
            storage: StorageConfig::from_env().map_err(String::from)?,
            env_override: HookEnv::from_env().package_manager,
            cwd: env::current_dir().map_err(|e| format!("Failed to read cwd: {}", e))?,
            probe: Box::new(SystemProbe),
        })
    }

    fn resolver(&self) -> PackageManagerResolver<'_> {
        PackageManagerResolver::new(&self.storage, self.probe.as_ref(), self.env_override.clone())
    }

    /// Runs `action`, returning the process exit code.
    fn execute(&self, action: Action, out: &mut dyn Write, err: &mut dyn Write) -> u8 {
        let result = match action {
            Action::Help => write_help(out),
            Action::Detect => self.detect(out),
            Action::List => self.list(out),
            Action::SetGlobal(name) => return self.set_global(&name, out, err),
            Action::SetProject(name) => return self.set_project(&name, out, err),
        };
        if let Err(e) = result {
            tracing::warn!(error = %e, "Failed to write output");
        }
        0
    }

    fn detect(&self, out: &mut dyn Write) -> io::Result<()> {
        let resolver = self.resolver();
        let pm = resolver.resolve_default(&self.cwd);
        let available = resolver.available();

        writeln!(out, "\n=== Package Manager Detection ===\n")?;

        writeln!(out, "Current selection:")?;
        writeln!(out, "  Package Manager: {}", pm.name)?;
        writeln!(out, "  Source: {}", pm.source)?;
        writeln!(out)?;

        let from_pkg = detect_from_package_json(&self.cwd);
        let from_lock = detect_from_lock_file(&self.cwd);
        writeln!(out, "Detection results:")?;
        writeln!(
            out,
            "  From package.json: {}",
            from_pkg.map_or("not specified", PackageManagerName::as_str)
        )?;
        writeln!(
            out,
            "  From lock file: {}",
            from_lock.map_or("not found", PackageManagerName::as_str)
        )?;
        writeln!(
            out,
            "  Environment var: {}",
            resolver.env_override().unwrap_or("not set")
        )?;
        writeln!(out)?;

        writeln!(out, "Available package managers:")?;
        for name in PackageManagerName::ALL {
            let indicator = if available.contains(&name) { "✓" } else { "✗" };
            let current = if name == pm.name { " (current)" } else { "" };
            writeln!(out, "  {} {}{}", indicator, name, current)?;
        }
        writeln!(out)?;

        writeln!(out, "Commands:")?;
        writeln!(out, "  Install: {}", pm.config.install_cmd)?;
        writeln!(out, "  Run script: {} [script-name]", pm.config.run_cmd)?;
        writeln!(out, "  Execute binary: {} [binary-name]", pm.config.exec_cmd)?;
        writeln!(out)
    }

    fn list(&self, out: &mut dyn Write) -> io::Result<()> {
        let resolver = self.resolver();
        let pm = resolver.resolve_default(&self.cwd);
        let available = resolver.available();

        writeln!(out, "\nAvailable package managers:\n")?;
        for name in PackageManagerName::ALL {
            let descriptor = name.descriptor();
            let current = if name == pm.name { " (current)" } else { "" };
            let installed = if available.contains(&name) { "yes" } else { "no" };

            writeln!(out, "{}{}", name, current)?;
            writeln!(out, "  Installed: {}", installed)?;
            writeln!(out, "  Lock file: {}", descriptor.lock_file)?;
            writeln!(out, "  Install: {}", descriptor.install_cmd)?;
            writeln!(out, "  Run: {}", descriptor.run_cmd)?;
            writeln!(out)?;
        }
        Ok(())
    }

    fn set_global(&self, name: &str, out: &mut dyn Write, err: &mut dyn Write) -> u8 {
        if let Some(pm) = PackageManagerName::parse(name) {
            if !self.probe.exists(pm.as_str()) {
                let _ = writeln!(err, "Warning: {} is not installed on your system", pm);
            }
        }

        match set_preferred_package_manager(&self.storage, name) {
            Ok(record) => {
                let _ = writeln!(
                    out,
                    "\n✓ Global preference set to: {}\n  Saved to: ~/.claude/package-manager.json\n",
                    record.package_manager
                );
                0
            }
            Err(e) => report_set_error(name, &e, err),
        }
    }

    fn set_project(&self, name: &str, out: &mut dyn Write, err: &mut dyn Write) -> u8 {
        match set_project_package_manager(name, &self.cwd) {
            Ok(record) => {
                let _ = writeln!(
                    out,
                    "\n✓ Project preference set to: {}\n  Saved to: .claude/package-manager.json\n",
                    record.package_manager
                );
                0
            }
            Err(e) => report_set_error(name, &e, err),
        }
    }
}

fn report_set_error(name: &str, error: &hookkit_core::HookkitError, err: &mut dyn Write) -> u8 {
    tracing::error!(package_manager = name, error = %error, "Failed to set package manager");
    let _ = writeln!(err, "Error: {}", error);
    if matches!(error, hookkit_core::HookkitError::UnknownPackageManager(_)) {
        let names: Vec<&str> = PackageManagerName::ALL.iter().map(|pm| pm.as_str()).collect();
        let _ = writeln!(err, "Available: {}", names.join(", "));
    }
    1
}

fn write_help(out: &mut dyn Write) -> io::Result<()> {
    writeln!(out, "\nPackage manager setup for Claude Code\n")?;
    writeln!(out, "Usage:")?;
    writeln!(out, "  setup-pm [options] [package-manager]\n")?;
    writeln!(out, "Options:")?;
    writeln!(out, "  --detect        Detect and show current package manager")?;
    writeln!(out, "  --global <pm>   Set global preference (saves to ~/.claude/package-manager.json)")?;
    writeln!(out, "  --project <pm>  Set project preference (saves to .claude/package-manager.json)")?;
    writeln!(out, "  --list          List available package managers")?;
    writeln!(out, "  -h, --help      Show this help message\n")?;
    writeln!(out, "Package managers:")?;
    for pm in PackageManagerName::ALL {
        writeln!(out, "  {:<16}{}", pm.as_str(), pm.summary())?;
    }
    writeln!(out, "\nExamples:")?;
    writeln!(out, "  setup-pm --detect")?;
    writeln!(out, "  setup-pm --global pnpm")?;
    writeln!(out, "  setup-pm --project bun")?;
    writeln!(out, "  setup-pm --list")
}

fn main() -> ExitCode {
    let _logging_guard = logging::init();

    let action = match Cli::try_parse() {
        Ok(cli) => cli.action(),
        Err(e) => {
            let _ = e.print();
            let _ = write_help(&mut io::stderr());
            return ExitCode::from(1);
        }
    };

    let setup = match Setup::from_env() {
        Ok(setup) => setup,
        Err(e) => {
            tracing::error!(error = %e, "setup-pm failed");
            eprintln!("Error: {}", e);
            return ExitCode::from(1);
        }
    };

    let code = setup.execute(action, &mut io::stdout(), &mut io::stderr());
    ExitCode::from(code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hookkit_core::package_manager::{read_preference, SignalOutcome};
    use tempfile::TempDir;

    struct Installed(&'static [&'static str]);

    impl CommandProbe for Installed {
        fn exists(&self, name: &str) -> bool {
            self.0.iter().any(|installed| *installed == name)
        }
    }

    fn setup(temp: &TempDir, installed: &'static [&'static str]) -> Setup {
        let cwd = temp.path().join("project");
        std::fs::create_dir_all(&cwd).unwrap();
        Setup {
            storage: StorageConfig::with_root(temp.path().join("home")),
            env_override: None,
            cwd,
            probe: Box::new(Installed(installed)),
        }
    }

    fn parse(args: &[&str]) -> Result<Action, clap::Error> {
        let argv = std::iter::once("setup-pm").chain(args.iter().copied());
        Cli::try_parse_from(argv).map(Cli::action)
    }

    fn execute(setup: &Setup, action: Action) -> (u8, String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let code = setup.execute(action, &mut out, &mut err);
        (
            code,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Argument Handling
    // ─────────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_no_args_shows_help() {
        assert_eq!(parse(&[]).unwrap(), Action::Help);
        assert_eq!(parse(&["-h"]).unwrap(), Action::Help);
        assert_eq!(parse(&["--detect", "--help"]).unwrap(), Action::Help);
    }

    #[test]
    fn test_action_precedence() {
        assert_eq!(parse(&["--list", "--detect"]).unwrap(), Action::Detect);
        assert_eq!(
            parse(&["--project", "bun", "--global", "pnpm"]).unwrap(),
            Action::SetGlobal("pnpm".into())
        );
        assert_eq!(
            parse(&["--project", "bun"]).unwrap(),
            Action::SetProject("bun".into())
        );
        assert_eq!(parse(&["yarn"]).unwrap(), Action::SetGlobal("yarn".into()));
    }

    #[test]
    fn test_usage_errors() {
        assert!(parse(&["--global"]).is_err());
        assert!(parse(&["--project"]).is_err());
        assert!(parse(&["--bogus"]).is_err());
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Actions
    // ─────────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_help_lists_every_manager() {
        let temp = TempDir::new().unwrap();
        let (code, out, _) = execute(&setup(&temp, &[]), Action::Help);
        assert_eq!(code, 0);
        for pm in PackageManagerName::ALL {
            assert!(out.contains(pm.summary()));
        }
    }

    #[test]
    fn test_detect_shows_signals() {
        let temp = TempDir::new().unwrap();
        let setup = setup(&temp, &["npm", "pnpm"]);
        std::fs::write(setup.cwd.join("pnpm-lock.yaml"), "").unwrap();

        let (code, out, _) = execute(&setup, Action::Detect);

        assert_eq!(code, 0);
        assert!(out.contains("  Package Manager: pnpm\n"));
        assert!(out.contains("  Source: lock-file\n"));
        assert!(out.contains("  From package.json: not specified\n"));
        assert!(out.contains("  From lock file: pnpm\n"));
        assert!(out.contains("  Environment var: not set\n"));
        assert!(out.contains("  ✓ pnpm (current)\n"));
        assert!(out.contains("  ✗ bun\n"));
        assert!(out.contains("  Install: pnpm install\n"));
        assert!(out.contains("  Execute binary: pnpm dlx [binary-name]\n"));
    }

    #[test]
    fn test_list_shows_install_status() {
        let temp = TempDir::new().unwrap();
        let (code, out, _) = execute(&setup(&temp, &["bun"]), Action::List);

        assert_eq!(code, 0);
        assert!(out.contains("bun (current)\n  Installed: yes\n  Lock file: bun.lockb\n"));
        assert!(out.contains("npm\n  Installed: no\n"));
    }

    #[test]
    fn test_set_global_warns_when_not_installed() {
        let temp = TempDir::new().unwrap();
        let setup = setup(&temp, &["npm"]);

        let (code, out, err) = execute(&setup, Action::SetGlobal("pnpm".into()));

        assert_eq!(code, 0);
        assert!(out.contains("Global preference set to: pnpm"));
        assert!(err.contains("Warning: pnpm is not installed"));
        assert_eq!(
            read_preference(&setup.storage.global_package_manager_file()),
            SignalOutcome::Found(PackageManagerName::Pnpm)
        );
    }

    #[test]
    fn test_set_global_unknown_fails() {
        let temp = TempDir::new().unwrap();
        let setup = setup(&temp, &[]);

        let (code, out, err) = execute(&setup, Action::SetGlobal("invalid-pm".into()));

        assert_eq!(code, 1);
        assert!(out.is_empty());
        assert!(err.contains("Unknown package manager: invalid-pm"));
        assert!(err.contains("Available: npm, pnpm, yarn, bun"));
        assert!(!setup.storage.global_package_manager_file().exists());
    }

    #[test]
    fn test_set_project_writes_into_cwd() {
        let temp = TempDir::new().unwrap();
        let setup = setup(&temp, &[]);

        let (code, out, _) = execute(&setup, Action::SetProject("bun".into()));

        assert_eq!(code, 0);
        assert!(out.contains("Project preference set to: bun"));
        assert_eq!(
            read_preference(&setup.cwd.join(".claude/package-manager.json")),
            SignalOutcome::Found(PackageManagerName::Bun)
        );
        assert!(!setup.storage.global_package_manager_file().exists());
    }
}
