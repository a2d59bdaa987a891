use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use fruitclass::{classify_file, preprocess_file};

#[derive(Parser, Debug)]
#[command(
    name = "fruitclass",
    version,
    about = "Preprocess fruit photos and classify them by circle detection"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert an image to grayscale and resize it to 100x100
    Preprocess {
        /// Color input image
        input_picture: PathBuf,
        /// Where the preprocessed image is written
        output_picture: PathBuf,
    },
    /// Detect circles in a grayscale image and write a JSON label
    Classify {
        /// Grayscale input image
        picture: PathBuf,
        /// Where the classification JSON is written
        result: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Preprocess {
            input_picture,
            output_picture,
        } => {
            preprocess_file(&input_picture, &output_picture)
                .with_context(|| format!("preprocess {}", input_picture.display()))?;
            println!("Finished");
        }
        Commands::Classify { picture, result } => {
            classify_file(&picture, &result)
                .with_context(|| format!("classify {}", picture.display()))?;
        }
    }
    Ok(())
}
