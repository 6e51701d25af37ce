// dvoacap: run one DVOACAP prediction through the native library.

mod cli;
mod config;

use anyhow::Context;
use clap::Parser;
use dvoa_core::{Invoker, Prediction, Sink, Source};
use log::info;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = cli::Args::parse();
    let mut cfg = config::load(args.config.as_deref())?;
    cfg.apply_args(&args);

    let source = Source::parse(&args.infile);
    let sink = Sink::parse(&args.outfile);
    let prediction = run(&cfg, &source, &sink)?;
    info!(
        "prediction done: input sha256 {}, output sha256 {}",
        prediction.input_digest.short(),
        prediction.output_digest.short()
    );

    if !args.quiet {
        // Keep the report clean when it goes to stdout.
        if sink == Sink::Stdout {
            eprintln!("Done");
        } else {
            println!("Done");
        }
    }
    Ok(())
}

/// Load the configured library, then predict `source` into `sink`.
fn run(cfg: &config::Config, source: &Source, sink: &Sink) -> anyhow::Result<Prediction> {
    let invoker = Invoker::load(&cfg.library, &cfg.entry_point)
        .context("loading prediction library")?
        .with_json_check(cfg.check_json);
    invoker
        .run(source, sink)
        .with_context(|| format!("predicting {} -> {}", source, sink))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const INPUT: &str = "{\"tx\":\"W1AW\",\"rx\":\"G3ABC\",\"month\":6}";

    #[test]
    fn missing_library_leaves_output_alone() {
        let dir = tempfile::tempdir().unwrap();
        let infile = dir.path().join("input.json");
        let outfile = dir.path().join("output.txt");
        fs::write(&infile, INPUT).unwrap();
        fs::write(&outfile, "prev").unwrap();
        let cfg = config::Config {
            library: dir.path().join("libdvoa.so"),
            ..config::Config::default()
        };
        let err = run(&cfg, &Source::Path(infile), &Sink::Path(outfile.clone())).unwrap_err();
        assert!(format!("{:#}", err).contains("loading prediction library"));
        assert_eq!(fs::read_to_string(&outfile).unwrap(), "prev");
    }

    #[cfg(all(target_os = "linux", target_env = "gnu"))]
    mod glibc {
        use super::*;
        use std::path::PathBuf;

        fn libc_config(entry_point: &str) -> config::Config {
            config::Config {
                library: PathBuf::from("libc.so.6"),
                entry_point: entry_point.to_string(),
                check_json: false,
            }
        }

        #[test]
        fn missing_symbol_creates_no_output() {
            let dir = tempfile::tempdir().unwrap();
            let infile = dir.path().join("input.json");
            let outfile = dir.path().join("output.txt");
            fs::write(&infile, INPUT).unwrap();
            let cfg = libc_config("NoSuchPredictSymbol");
            run(&cfg, &Source::Path(infile), &Sink::Path(outfile.clone())).unwrap_err();
            assert!(!outfile.exists());
        }

        // strdup echoes its argument, so the output must equal the input.
        #[test]
        fn echo_entry_point_writes_result() {
            let dir = tempfile::tempdir().unwrap();
            let infile = dir.path().join("input.json");
            let outfile = dir.path().join("output.txt");
            fs::write(&infile, INPUT).unwrap();
            let p = run(
                &libc_config("strdup"),
                &Source::Path(infile),
                &Sink::Path(outfile.clone()),
            )
            .unwrap();
            assert_eq!(p.output.as_str(), INPUT);
            assert_eq!(fs::read_to_string(&outfile).unwrap(), INPUT);
        }

        #[test]
        fn json_check_rejects_before_write() {
            let dir = tempfile::tempdir().unwrap();
            let infile = dir.path().join("input.json");
            let outfile = dir.path().join("output.txt");
            fs::write(&infile, "notjson").unwrap();
            let cfg = config::Config {
                check_json: true,
                ..libc_config("strdup")
            };
            run(&cfg, &Source::Path(infile), &Sink::Path(outfile.clone())).unwrap_err();
            assert!(!outfile.exists());
        }
    }
}
