use super::*;
use hardy_bpv6::{prelude::*, redundancy::Config};

#[derive(Parser, Debug)]
#[command(about, long_about = None)]
pub struct Command {
    /// Cache configuration file (TOML). Settings can also be given as
    /// HARDY_BPV6_* environment variables.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Run this many cache sweeps between consecutive bundles, to model
    /// their arrival time
    #[arg(short, long, default_value_t = 0)]
    sweeps: usize,

    /// The list of bundle files to check, in arrival order, '-' to use stdin.
    files: Vec<io::Input>,
}

fn environment() -> config::Environment {
    config::Environment::with_prefix("HARDY_BPV6").try_parsing(true)
}

fn load_config(
    path: Option<&std::path::Path>,
    environment: config::Environment,
) -> anyhow::Result<Config> {
    let mut b = config::Config::builder();
    if let Some(path) = path {
        info!("Using cache configuration file '{}'", path.display());
        b = b.add_source(config::File::from(path).format(config::FileFormat::Toml));
    }
    b = b.add_source(environment);

    b.build()
        .and_then(|c| c.try_deserialize::<Config>())
        .map_err(|e| anyhow::anyhow!("Failed to load cache configuration: {e}"))
}

impl Command {
    pub fn exec(self) -> anyhow::Result<()> {
        if self.files.is_empty() {
            return Err(anyhow::anyhow!("No files to check"));
        }

        let config = load_config(self.config.as_deref(), environment())?;
        debug!("Cache configuration: {config:?}");
        let mut cache = RedundancyCache::new(config);

        let mut count_failed: usize = 0;
        for (i, input) in self.files.iter().enumerate() {
            if i != 0 {
                for _ in 0..self.sweeps {
                    cache.sweep();
                }
            }

            let data = input.read_all()?;
            let outcome = Bundle::parse(data.as_slice()).and_then(|bundle| {
                let fingerprint = Fingerprint::of(&bundle)?;
                cache.set(&bundle).map(|outcome| (fingerprint, outcome))
            });

            match outcome {
                Ok((fingerprint, SetOutcome::Inserted)) => {
                    println!("{input}: new {fingerprint:?}");
                }
                Ok((fingerprint, SetOutcome::AlreadyKnown)) => {
                    println!("{input}: duplicate {fingerprint:?}");
                }
                Err(e) if e.kind() == ErrorKind::Capacity => {
                    warn!("{input}: {e}");
                    println!("{input}: unknown, cache full");
                }
                Err(e) => {
                    eprintln!("{input}: Failed to process bundle: {e}");
                    count_failed = count_failed.saturating_add(1);
                }
            }
        }

        (count_failed == 0)
            .then_some(())
            .ok_or(anyhow::anyhow!("{count_failed} files failed to parse"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(vars: &[(&str, &str)]) -> config::Environment {
        environment().source(Some(
            vars.iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        ))
    }

    #[test]
    fn defaults() {
        let config = load_config(None, env(&[])).unwrap();
        assert_eq!(config.capacity.get(), 10);
        assert_eq!(config.sweep_interval.get(), 5);
    }

    #[test]
    fn environment_overrides() {
        let config = load_config(
            None,
            env(&[
                ("HARDY_BPV6_CAPACITY", "32"),
                ("HARDY_BPV6_SWEEP_INTERVAL", "2"),
            ]),
        )
        .unwrap();
        assert_eq!(config.capacity.get(), 32);
        assert_eq!(config.sweep_interval.get(), 2);

        assert!(load_config(None, env(&[("HARDY_BPV6_CAPACITY", "0")])).is_err());
    }

    #[test]
    fn file_then_environment() {
        let path = std::env::temp_dir().join(format!("hardy-bpv6-dedup-{}.toml", std::process::id()));
        std::fs::write(&path, "capacity = 4\nsweep-interval = 7\n").unwrap();

        let config = load_config(Some(&path), env(&[("HARDY_BPV6_CAPACITY", "8")]));
        _ = std::fs::remove_file(&path);

        let config = config.unwrap();
        assert_eq!(config.capacity.get(), 8);
        assert_eq!(config.sweep_interval.get(), 7);
    }
}
