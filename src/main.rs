use std::error;
use std::fs::File;
use std::io::{self, BufWriter};

use log::{error, info};

use eca_spectrum::config::{self, Config};
use eca_spectrum::export::{write_density, write_pgm};
use eca_spectrum::source::{BitSource, RandomBits};
use eca_spectrum::{construct, density, density_par};

fn run() -> Result<(), Box<dyn error::Error>> {
    let matches = config::app().get_matches();
    let config = Config::from_matches(&matches)?;

    info!(
        "{} on {} cells for {} steps, {} frequencies",
        config.rule,
        config.width,
        config.depth,
        config.frequencies.len()
    );

    if config.jobs > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(config.jobs)
            .build_global()?;
    }

    let mut bits: Box<dyn BitSource> = match (config.init.clone(), config.seed) {
        (Some(pattern), _) => Box::new(pattern),
        (None, Some(seed)) => Box::new(RandomBits::seeded(seed)),
        (None, None) => Box::new(RandomBits::from_entropy()),
    };
    let matrix = construct(config.width, config.depth, &config.rule, bits.as_mut())?;

    if let Some(path) = &config.pgm {
        write_pgm(BufWriter::new(File::create(path)?), &matrix)?;
        info!("wrote space-time pattern to {}", path.display());
    }

    let spectrum = if config.jobs == 1 {
        density(&matrix, config.width, config.depth, &config.frequencies)?
    } else {
        density_par(&matrix, config.width, config.depth, &config.frequencies)?
    };
    let curve = config.frequencies.iter().cloned().zip(spectrum);

    match &config.output {
        Some(path) => {
            write_density(BufWriter::new(File::create(path)?), curve)?;
            info!("wrote density to {}", path.display());
        }
        None => {
            let stdout = io::stdout();
            write_density(stdout.lock(), curve)?;
        }
    }

    Ok(())
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        error!("{}", e);
        std::process::exit(1);
    }
}
