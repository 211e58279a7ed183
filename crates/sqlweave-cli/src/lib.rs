mod cli;
mod config;
mod dialects;
mod query_file;
mod render;

pub fn run(args: Vec<String>) -> anyhow::Result<()> {
    let cmd = cli::parse_args(&args)?;
    match cmd {
        cli::Command::Help(topic) => {
            cli::print_help(topic);
            Ok(())
        }
        cli::Command::Render(args) => render::run(args),
        cli::Command::Dialects => {
            print!("{}", dialects::listing());
            Ok(())
        }
    }
}
