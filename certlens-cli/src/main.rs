use certlens_cli::{config::Config, logging, run};

fn main() -> anyhow::Result<()> {
    let config = Config::from_args()?;
    let _log_handle = logging::init_logs(config.log_level)?;

    if config.default_input {
        eprintln!(
            "No certificate file given, reading {}",
            config.input.display()
        );
    }

    let report = run(&config)?;
    print!("{}", report);

    Ok(())
}
