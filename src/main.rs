use std::{error::Error, fs};

use clap::{Parser, ValueEnum};
use nom::error::Error as NomError;
use tracing::{debug, info, Level};
use tracing_subscriber::fmt::SubscriberBuilder;

use cubenet::{
    grid::Grid,
    parse::{map_input, Command},
    CubeWalker, FlatWalker, Walker,
};

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
enum Part {
    /// Walk the map as a flat surface, wrapping around rows and columns
    #[value(name = "1")]
    Flat,
    /// Walk the map folded into a cube
    #[value(name = "2")]
    Cube,
    Both,
}

/// Walk a monkey map, flat or folded into a cube, and print the final password
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// File to parse
    file: String,

    /// Side of a cube face, guessed from the map when missing
    #[arg(short, long)]
    tile_size: Option<i16>,

    /// Which walk to do
    #[arg(short, long, value_enum, default_value_t = Part::Both)]
    part: Part,

    /// Print the map with the path taken
    #[arg(short, long)]
    dump: bool,

    /// Log the net and how it folds
    #[arg(short, long)]
    verbose: bool,
}

fn walk(name: &str, walker: &impl Walker, cmds: &[Command], dump: bool) {
    let Some((end, traversed)) = walker.execute(cmds) else {
        println!("{name}: no open tile to start from");
        return;
    };

    if dump {
        println!("{}", walker.grid().render(&traversed));
    }

    debug!("{name} walk ended at {} facing {}", end.pos, end.dir);

    println!("{name}: {}", end.password());
}

fn tile_size(g: &Grid, arg: Option<i16>) -> Result<i16, Box<dyn Error>> {
    let side = match arg {
        Some(side) => side,
        None => g
            .face_len()
            .ok_or("the map does not cover six square tiles, use --tile-size")?,
    };

    info!("tile size is {side}");

    Ok(side)
}

fn main() -> Result<(), Box<dyn Error>> {
    let Args {
        file,
        tile_size: size,
        part,
        dump,
        verbose,
    } = Args::parse();

    SubscriberBuilder::default()
        .with_target(false)
        .with_max_level(if verbose { Level::DEBUG } else { Level::WARN })
        .init();

    let (g, cmds) = map_input(&fs::read_to_string(file)?)
        .map_err(|e| e.map(|e| NomError::new(e.input.to_string(), e.code)))?
        .1;

    if part != Part::Cube {
        walk("flat", &FlatWalker::new(&g), &cmds, dump);
    }

    if part != Part::Flat {
        let walker = CubeWalker::new(&g, tile_size(&g, size)?)?;

        walk("cube", &walker, &cmds, dump);
    }

    Ok(())
}
