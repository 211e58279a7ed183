use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelpTopic {
    Root,
    Render,
    Dialects,
}

#[derive(Debug, Clone)]
pub enum Command {
    Help(HelpTopic),
    Render(RenderArgs),
    Dialects,
}

#[derive(Debug, Clone, Default)]
pub struct RenderArgs {
    /// Explicit config path; `None` means "use sqlweave.toml if present".
    pub config: Option<PathBuf>,
    pub dialect: Option<String>,
    pub native: bool,
    pub inline: bool,
    pub files: Vec<PathBuf>,
}

pub fn parse_args(args: &[String]) -> anyhow::Result<Command> {
    let mut it = args.iter().skip(1);
    let Some(first) = it.next() else {
        return Ok(Command::Help(HelpTopic::Root));
    };

    match first.as_str() {
        "-h" | "--help" => Ok(Command::Help(HelpTopic::Root)),
        "render" => parse_render(it.map(|s| s.as_str())),
        "dialects" => parse_dialects(it.map(|s| s.as_str())),
        _ => anyhow::bail!("unknown command: {first}"),
    }
}

fn parse_render<'a>(mut it: impl Iterator<Item = &'a str>) -> anyhow::Result<Command> {
    let mut args = RenderArgs::default();

    while let Some(token) = it.next() {
        match token {
            "-h" | "--help" => return Ok(Command::Help(HelpTopic::Render)),
            "--config" => {
                let Some(v) = it.next() else {
                    anyhow::bail!("--config requires a value");
                };
                args.config = Some(PathBuf::from(v));
            }
            _ if token.starts_with("--config=") => {
                args.config = Some(PathBuf::from(token.trim_start_matches("--config=")));
            }
            "--dialect" => {
                let Some(v) = it.next() else {
                    anyhow::bail!("--dialect requires a value");
                };
                args.dialect = Some(v.to_string());
            }
            _ if token.starts_with("--dialect=") => {
                args.dialect = Some(token.trim_start_matches("--dialect=").to_string());
            }
            "--native" => args.native = true,
            "--inline" => args.inline = true,
            _ if token.starts_with('-') => anyhow::bail!("unknown option: {token}"),
            _ => args.files.push(PathBuf::from(token)),
        }
    }

    if args.files.is_empty() {
        anyhow::bail!("render requires at least one query file");
    }
    Ok(Command::Render(args))
}

fn parse_dialects<'a>(mut it: impl Iterator<Item = &'a str>) -> anyhow::Result<Command> {
    match it.next() {
        None => Ok(Command::Dialects),
        Some("-h" | "--help") => Ok(Command::Help(HelpTopic::Dialects)),
        Some(other) => anyhow::bail!("unexpected argument: {other}"),
    }
}

pub fn print_help(topic: HelpTopic) {
    match topic {
        HelpTopic::Root => {
            println!(
                "\
sqlweave - render query descriptions to dialect-specific SQL

USAGE:
  sqlweave <COMMAND> [OPTIONS]

COMMANDS:
  render        Render TOML query files to SQL plus arguments
  dialects      List supported dialects and their paging strategies

Run `sqlweave <command> --help` for more."
            );
        }
        HelpTopic::Render => {
            println!(
                "\
USAGE:
  sqlweave render [OPTIONS] <FILE>...

OPTIONS:
  --config <FILE>       Config file path (default: sqlweave.toml if present)
  --dialect <NAME>      Target dialect (overrides query file and config)
  --native              Rewrite `?` into the dialect's native placeholders
  --inline              Print SQL with arguments inlined as literals
  -h, --help            Print help"
            );
        }
        HelpTopic::Dialects => {
            println!(
                "\
USAGE:
  sqlweave dialects

Lists accepted dialect names, their paging strategy and placeholder style."
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        std::iter::once("sqlweave")
            .chain(args.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn parse_render_with_options() {
        let cmd = parse_args(&argv(&[
            "render",
            "--config",
            "conf/sqlweave.toml",
            "--dialect=oracle",
            "--native",
            "a.toml",
            "b.toml",
        ]))
        .unwrap();
        let Command::Render(r) = cmd else {
            panic!("expected render");
        };

        assert_eq!(r.config, Some(PathBuf::from("conf/sqlweave.toml")));
        assert_eq!(r.dialect.as_deref(), Some("oracle"));
        assert!(r.native);
        assert!(!r.inline);
        assert_eq!(
            r.files,
            vec![PathBuf::from("a.toml"), PathBuf::from("b.toml")]
        );
    }

    #[test]
    fn parse_render_requires_files() {
        let err = parse_args(&argv(&["render", "--inline"])).unwrap_err();
        assert!(err.to_string().contains("at least one query file"));
    }

    #[test]
    fn parse_render_rejects_unknown_option() {
        let err = parse_args(&argv(&["render", "--verbose", "a.toml"])).unwrap_err();
        assert_eq!(err.to_string(), "unknown option: --verbose");

        let err = parse_args(&argv(&["render", "--dialect"])).unwrap_err();
        assert_eq!(err.to_string(), "--dialect requires a value");
    }

    #[test]
    fn parse_help_topics() {
        assert!(matches!(
            parse_args(&argv(&[])).unwrap(),
            Command::Help(HelpTopic::Root)
        ));
        assert!(matches!(
            parse_args(&argv(&["render", "--help"])).unwrap(),
            Command::Help(HelpTopic::Render)
        ));
        assert!(matches!(
            parse_args(&argv(&["dialects"])).unwrap(),
            Command::Dialects
        ));
        assert!(parse_args(&argv(&["migrate"])).is_err());
    }
}
