extern crate clap;
extern crate env_logger;
extern crate mandelbrot;

use clap::{App, Arg, ArgMatches};
use mandelbrot::{MandelbrotRenderer, OutputFormat};
use std::str::FromStr;

fn validate_parse<T: FromStr>(s: &str, err: &str) -> Result<(), String> {
    match T::from_str(s) {
        Ok(_) => Ok(()),
        Err(_) => Err(err.to_string()),
    }
}

const OUTPUT: &str = "output";
const HEIGHT: &str = "height";
const ITERATIONS: &str = "iterations";
const SCALE: &str = "scale";
const FORMAT: &str = "format";

fn args<'a>() -> ArgMatches<'a> {
    App::new("mandel")
        .version("0.1.0")
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Mandelbrot renderer")
        .arg(
            Arg::with_name(OUTPUT)
                .required(true)
                .long(OUTPUT)
                .short("o")
                .takes_value(true)
                .help("Output file"),
        )
        .arg(
            Arg::with_name(HEIGHT)
                .required(false)
                .long(HEIGHT)
                .short("H")
                .takes_value(true)
                .default_value("1024")
                .validator(|s| validate_parse::<usize>(&s, "Could not parse image height"))
                .help("Height of the output image; the width follows from the scale"),
        )
        .arg(
            Arg::with_name(ITERATIONS)
                .required(false)
                .long(ITERATIONS)
                .short("i")
                .takes_value(true)
                .default_value("1000")
                .validator(|s| validate_parse::<u32>(&s, "Could not parse iteration count"))
                .help("Maximum number of iterations per pixel"),
        )
        .arg(
            Arg::with_name(SCALE)
                .required(false)
                .long(SCALE)
                .short("s")
                .takes_value(true)
                .default_value("2.0")
                .validator(|s| validate_parse::<f64>(&s, "Could not parse scale factor"))
                .help("Scale factor; also the escape radius"),
        )
        .arg(
            Arg::with_name(FORMAT)
                .required(false)
                .long(FORMAT)
                .short("f")
                .takes_value(true)
                .default_value("png")
                .validator(|s| {
                    validate_parse::<OutputFormat>(&s, "Format must be png, jpeg or bmp")
                })
                .help("Output image format"),
        )
        .get_matches()
}

fn main() {
    env_logger::init();
    let matches = args();
    let height = usize::from_str(matches.value_of(HEIGHT).unwrap())
        .expect("Could not parse image height.");
    let iterations = u32::from_str(matches.value_of(ITERATIONS).unwrap())
        .expect("Could not parse iteration count.");
    let scale = f64::from_str(matches.value_of(SCALE).unwrap())
        .expect("Could not parse scale factor.");
    let format = OutputFormat::from_str(matches.value_of(FORMAT).unwrap())
        .expect("Could not parse output format.");
    let output = matches.value_of(OUTPUT).unwrap();

    let mut renderer = match MandelbrotRenderer::new(height, iterations, scale) {
        Ok(renderer) => renderer,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = renderer.generate().and_then(|_| renderer.save(output, format)) {
        eprintln!("Render failure: {}", e);
        std::process::exit(1);
    }
}
