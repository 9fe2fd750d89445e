use clap::{App, Arg, SubCommand};
use std::fs;
use std::path::PathBuf;
use std::process;

//===========================================================================//

fn main() {
    let matches = App::new("icotool")
        .version("0.1")
        .about("Packs PNG files into ICO files and back")
        .subcommand(
            SubCommand::with_name("create")
                .about("Creates an ICO file from PNG files")
                .arg(
                    Arg::with_name("output")
                        .takes_value(true)
                        .value_name("PATH")
                        .short("o")
                        .long("output")
                        .help("Sets output path"),
                )
                .arg(
                    Arg::with_name("no-size-limit")
                        .long("no-size-limit")
                        .help("Allows images larger than 256x256"),
                )
                .arg(Arg::with_name("image").multiple(true)),
        )
        .subcommand(
            SubCommand::with_name("extract")
                .about("Extracts the PNG images from an ICO file")
                .arg(
                    Arg::with_name("output")
                        .takes_value(true)
                        .value_name("DIR")
                        .short("o")
                        .long("output")
                        .help("Sets output directory"),
                )
                .arg(Arg::with_name("ico").required(true)),
        )
        .subcommand(
            SubCommand::with_name("list")
                .about("Lists the images in an ICO file")
                .arg(Arg::with_name("ico").required(true)),
        )
        .get_matches();
    let result = if let Some(submatches) = matches.subcommand_matches("create")
    {
        create(submatches)
    } else if let Some(submatches) = matches.subcommand_matches("extract") {
        extract(submatches)
    } else if let Some(submatches) = matches.subcommand_matches("list") {
        list(submatches)
    } else {
        Ok(())
    };
    if let Err(error) = result {
        eprintln!("icotool: {}", error);
        process::exit(1);
    }
}

fn create(submatches: &clap::ArgMatches) -> pngico::Result<()> {
    let out_path = if let Some(path) = submatches.value_of("output") {
        PathBuf::from(path)
    } else {
        let mut path = PathBuf::from("out.ico");
        let mut index: i32 = 0;
        while path.exists() {
            index += 1;
            path = PathBuf::from(format!("out{}.ico", index));
        }
        path
    };
    let paths: Vec<PathBuf> = submatches
        .values_of("image")
        .map(|paths| paths.map(PathBuf::from).collect())
        .unwrap_or_default();
    for path in paths.iter() {
        println!("Adding {:?}", path);
    }
    let options = pngico::EncodeOptions::new()
        .limit_dimensions(!submatches.is_present("no-size-limit"));
    let blob = pngico::encode_sources(&paths, &options)?;
    fs::write(out_path, blob.data())?;
    Ok(())
}

fn extract(submatches: &clap::ArgMatches) -> pngico::Result<()> {
    let path = PathBuf::from(submatches.value_of("ico").unwrap_or_default());
    let out_dir = match submatches.value_of("output") {
        Some(dir) => PathBuf::from(dir),
        None => PathBuf::from("."),
    };
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "icon".to_string());
    for (index, image) in
        pngico::decode_source(&path)?.into_iter().enumerate()
    {
        let out_path = out_dir.join(format!("{}.{}.png", file_name, index));
        println!("Writing {:?}", out_path);
        fs::write(out_path, image.into_blob().data())?;
    }
    Ok(())
}

fn list(submatches: &clap::ArgMatches) -> pngico::Result<()> {
    let path = PathBuf::from(submatches.value_of("ico").unwrap_or_default());
    for (index, image) in pngico::decode_source(&path)?.iter().enumerate() {
        println!(
            "{:5}: {}x{} PNG, {} bpp, {} bytes",
            index,
            image.width(),
            image.height(),
            image.bits_per_pixel(),
            image.data().len()
        );
    }
    Ok(())
}

//===========================================================================//
