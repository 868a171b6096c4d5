use std::path::{Path, PathBuf};
use std::process;

use anyhow::{bail, Context};
use clap::{command, value_parser, Arg, ArgAction, ArgMatches, Command};
use log::{info, LevelFilter};

use rsa_edu::rsa::{decrypt, decrypt_blocks, encrypt, export_key, generate_keypair_with, import_key};
use rsa_edu::util::file_ops::{read_file, read_key_record, write_file, write_key_record};
use rsa_edu::{CancelToken, EngineConfig, KeyRecord};

fn cli() -> Command {
    let key_arg = Arg::new("key")
        .long("key")
        .short('k')
        .action(ArgAction::Set)
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("key record file (JSON)");
    let input_arg = Arg::new("input")
        .long("input")
        .short('i')
        .action(ArgAction::Set)
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("input file");
    let output_arg = Arg::new("output")
        .long("output")
        .short('o')
        .action(ArgAction::Set)
        .required(false)
        .value_parser(value_parser!(PathBuf))
        .help("output file, hex on stdout when omitted");
    let block_arg = Arg::new("block-size")
        .long("block-size")
        .short('b')
        .action(ArgAction::Set)
        .required(false)
        .value_parser(value_parser!(usize))
        .help("plaintext bytes per block");

    command!()
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .action(ArgAction::Set)
                .value_parser(value_parser!(PathBuf))
                .help("engine configuration file (JSON)"),
        )
        .subcommand(
            Command::new("keygen")
                .about("generate a keypair")
                .arg(
                    Arg::new("bits")
                        .long("bits")
                        .action(ArgAction::Set)
                        .value_parser(value_parser!(u32))
                        .help("modulus bit length"),
                )
                .arg(
                    Arg::new("public")
                        .long("public")
                        .action(ArgAction::Set)
                        .value_parser(value_parser!(PathBuf))
                        .help("where to write the public key record"),
                )
                .arg(
                    Arg::new("private")
                        .long("private")
                        .action(ArgAction::Set)
                        .value_parser(value_parser!(PathBuf))
                        .help("where to write the private key record"),
                ),
        )
        .subcommand(
            Command::new("encrypt")
                .about("encrypt a file with a public or private key record")
                .arg(key_arg.clone())
                .arg(input_arg.clone())
                .arg(output_arg.clone())
                .arg(block_arg.clone()),
        )
        .subcommand(
            Command::new("decrypt")
                .about("decrypt a file with a private key record")
                .arg(key_arg)
                .arg(input_arg)
                .arg(output_arg.help("output file, printed on stdout when omitted"))
                .arg(block_arg.help("restore blocks to exactly this many bytes")),
        )
}

fn load_config(m: &ArgMatches) -> anyhow::Result<EngineConfig> {
    match m.get_one::<PathBuf>("config") {
        Some(path) => {
            let data = read_file(path)?;
            let text = String::from_utf8(data).context("config file is not UTF-8")?;
            EngineConfig::from_json(&text).with_context(|| format!("loading {}", path.display()))
        }
        None => Ok(EngineConfig::default()),
    }
}

fn write_or_print(record: &KeyRecord, path: Option<&PathBuf>) -> anyhow::Result<()> {
    match path {
        Some(path) => {
            write_key_record(path, record)?;
            info!("wrote {}", path.display());
        }
        None => println!("{}", record.to_json()?),
    }
    Ok(())
}

fn keygen(config: EngineConfig, m: &ArgMatches) -> anyhow::Result<()> {
    let config = match m.get_one::<u32>("bits") {
        Some(bits) => config.with_key_bits(*bits),
        None => config,
    };
    config.validate()?;

    info!("generating a {}-bit keypair", config.key_bits);
    let keypair = generate_keypair_with(&config, &mut rand::rngs::OsRng, &CancelToken::new())?;

    write_or_print(&export_key(&keypair, false), m.get_one::<PathBuf>("public"))?;
    write_or_print(&export_key(&keypair, true), m.get_one::<PathBuf>("private"))?;
    Ok(())
}

fn load_key(path: &Path) -> anyhow::Result<rsa_edu::Keypair> {
    let record = read_key_record(path)?;
    import_key(&record).with_context(|| format!("importing {}", path.display()))
}

fn encrypt_file(config: EngineConfig, m: &ArgMatches) -> anyhow::Result<()> {
    let (Some(key), Some(input)) = (m.get_one::<PathBuf>("key"), m.get_one::<PathBuf>("input"))
    else {
        bail!("--key and --input are required");
    };
    let block_size = m
        .get_one::<usize>("block-size")
        .copied()
        .unwrap_or(config.block_size);

    let keypair = load_key(key)?;
    let plaintext = read_file(input)?;
    let ciphertext = encrypt(&plaintext, &keypair, block_size)?;
    info!(
        "encrypted {} bytes into {} bytes",
        plaintext.len(),
        ciphertext.len()
    );

    match m.get_one::<PathBuf>("output") {
        Some(path) => write_file(path, &ciphertext)?,
        None => println!("{}", hex::encode(&ciphertext)),
    }
    Ok(())
}

fn decrypt_file(m: &ArgMatches) -> anyhow::Result<()> {
    let (Some(key), Some(input)) = (m.get_one::<PathBuf>("key"), m.get_one::<PathBuf>("input"))
    else {
        bail!("--key and --input are required");
    };

    let keypair = load_key(key)?;
    let ciphertext = read_file(input)?;
    let plaintext = match m.get_one::<usize>("block-size") {
        Some(block_size) => decrypt_blocks(&ciphertext, &keypair, *block_size)?,
        None => decrypt(&ciphertext, &keypair)?,
    };
    info!("decrypted {} bytes", plaintext.len());

    match m.get_one::<PathBuf>("output") {
        Some(path) => write_file(path, &plaintext)?,
        None => println!("{}", String::from_utf8_lossy(&plaintext)),
    }
    Ok(())
}

fn run() -> anyhow::Result<()> {
    let app = cli().get_matches();
    let config = load_config(&app)?;

    match app.subcommand() {
        Some(("keygen", m)) => keygen(config, m),
        Some(("encrypt", m)) => encrypt_file(config, m),
        Some(("decrypt", m)) => decrypt_file(m),
        Some((name, _)) => bail!("unsupported subcommand {name}"),
        None => bail!("no subcommand given"),
    }
}

fn main() {
    env_logger::builder()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
