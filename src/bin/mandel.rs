#[macro_use]
extern crate clap;
extern crate env_logger;
#[macro_use]
extern crate log;
extern crate mandel;
extern crate num;
extern crate num_cpus;

use clap::{App, Arg, ArgMatches};
use mandel::{MandelError, RenderConfig};
use num::Complex;
use std::process;
use std::str::FromStr;

fn validate_number<T: FromStr>(s: &str, isnotanumber_err: &str) -> Result<(), String> {
    match T::from_str(s) {
        Ok(_) => Ok(()),
        Err(_) => Err(isnotanumber_err.to_string()),
    }
}

const XCENTER: &str = "xcenter";
const YCENTER: &str = "ycenter";
const SCALE: &str = "scale";
const WIDTH: &str = "width";
const HEIGHT: &str = "height";
const MAX: &str = "max";
const THREADS: &str = "threads";
const OUTPUT: &str = "output";

const EXAMPLES: &str = "Some examples are:
    mandel -x -0.5 -y -0.5 -s 0.2
    mandel -x -.38 -y -.665 -s .05 -m 100
    mandel -x 0.286932 -y 0.014287 -s .0005 -m 1000";

fn args<'a>() -> ArgMatches<'a> {
    App::new("mandel")
        .version("0.1.0")
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Grayscale Mandelbrot renderer")
        .after_help(EXAMPLES)
        .arg(
            Arg::with_name(MAX)
                .long(MAX)
                .short("m")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("1000")
                .validator(|s| validate_number::<usize>(&s, "Could not parse iteration count"))
                .help("The maximum number of iterations per point"),
        )
        .arg(
            Arg::with_name(XCENTER)
                .long(XCENTER)
                .short("x")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("0")
                .validator(|s| validate_number::<f64>(&s, "Could not parse x coordinate"))
                .help("X coordinate of image center point"),
        )
        .arg(
            Arg::with_name(YCENTER)
                .long(YCENTER)
                .short("y")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("0")
                .validator(|s| validate_number::<f64>(&s, "Could not parse y coordinate"))
                .help("Y coordinate of image center point"),
        )
        .arg(
            Arg::with_name(SCALE)
                .long(SCALE)
                .short("s")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("4")
                .validator(|s| validate_number::<f64>(&s, "Could not parse scale"))
                .help("Scale of the image in Mandelbrot coordinates"),
        )
        .arg(
            Arg::with_name(WIDTH)
                .long(WIDTH)
                .short("W")
                .takes_value(true)
                .default_value("500")
                .validator(|s| validate_number::<usize>(&s, "Could not parse image width"))
                .help("Width of the image in pixels"),
        )
        .arg(
            Arg::with_name(HEIGHT)
                .long(HEIGHT)
                .short("H")
                .takes_value(true)
                .default_value("500")
                .validator(|s| validate_number::<usize>(&s, "Could not parse image height"))
                .help("Height of the image in pixels"),
        )
        .arg(
            Arg::with_name(THREADS)
                .long(THREADS)
                .short("n")
                .takes_value(true)
                .default_value("1")
                .validator(|s| validate_number::<usize>(&s, "Could not parse thread count"))
                .help("Number of threads to render with"),
        )
        .arg(
            Arg::with_name(OUTPUT)
                .long(OUTPUT)
                .short("o")
                .takes_value(true)
                .default_value("mandel.bmp")
                .help("Output file; the format follows the extension"),
        )
        .get_matches()
}

fn config_from(matches: &ArgMatches) -> RenderConfig {
    let x = value_t!(matches, XCENTER, f64).unwrap_or_else(|e| e.exit());
    let y = value_t!(matches, YCENTER, f64).unwrap_or_else(|e| e.exit());
    RenderConfig {
        center: Complex::new(x, y),
        scale: value_t!(matches, SCALE, f64).unwrap_or_else(|e| e.exit()),
        width: value_t!(matches, WIDTH, usize).unwrap_or_else(|e| e.exit()),
        height: value_t!(matches, HEIGHT, usize).unwrap_or_else(|e| e.exit()),
        max_iterations: value_t!(matches, MAX, usize).unwrap_or_else(|e| e.exit()),
        workers: value_t!(matches, THREADS, usize).unwrap_or_else(|e| e.exit()),
    }
}

fn run(config: &RenderConfig, outfile: &str) -> Result<(), MandelError> {
    info!(
        "mandel: x={} y={} scale={} max={} threads={} outfile={}",
        config.center.re, config.center.im, config.scale, config.max_iterations, config.workers, outfile
    );
    let cpus = num_cpus::get();
    if config.workers > cpus {
        warn!(
            "{} threads requested but only {} CPUs are available",
            config.workers, cpus
        );
    }
    let raster = mandel::render(config)?;
    mandel::save(&raster, outfile)
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let matches = args();
    let config = config_from(&matches);
    let outfile = matches.value_of(OUTPUT).unwrap_or("mandel.bmp");

    if let Err(e) = run(&config, outfile) {
        eprintln!("mandel: {}", e);
        process::exit(1);
    }
}
