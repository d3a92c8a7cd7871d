//! `watchdog`: command line front end for the USB serial watchdog.
//!
//! Runs single operations against one port (`--port`) or every discovered
//! watchdog, and a demo loop that exercises the device according to its
//! configured channel modes.

use std::path::PathBuf;
use std::process::ExitCode;
use std::thread;
use std::time::Duration;

use clap::{ArgAction, Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use watchdog_driver::{discovery, DriverConfig, ParamsFile, WatchDog};
use watchdog_protocol::{Channel, RelayMode, SwitchState};

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

#[derive(Parser, Debug)]
#[command(name = "watchdog", version, about = "Control USB serial watchdogs")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Driver configuration file (YAML).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Serial port to use instead of scanning for watchdogs.
    #[arg(long, global = true)]
    port: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List USB serial ports and mark watchdogs.
    List,
    /// Run the demo sequence on every watchdog.
    Demo {
        /// Number of rounds per device.
        #[arg(long, default_value_t = 10)]
        rounds: u32,
    },
    #[command(flatten)]
    Device(DeviceCommand),
}

/// One operation run against each selected device.
#[derive(Subcommand, Debug)]
enum DeviceCommand {
    /// Check that the device answers.
    Ping,
    /// Print the firmware version.
    Version,
    /// Print the stored parameters.
    Params {
        /// Print as a YAML parameter file.
        #[arg(long)]
        yaml: bool,
    },
    /// Store parameters from a YAML file.
    WriteParams { file: PathBuf },
    /// Short press on channel 1 or 2.
    Touch { channel: Channel },
    /// Switch channel 1 or 2 on.
    On { channel: Channel },
    /// Switch channel 1 or 2 off.
    Off { channel: Channel },
    /// Suspend (on) or resume (off) the watchdog timer.
    Pause { state: SwitchState },
    /// Status LED on or off.
    Light { state: SwitchState },
    /// Soft reset through channel 1.
    Reset,
    /// Hard reset through channel 2.
    HardReset,
    /// Power off through channel 2.
    PowerOff,
    /// Reboot the device into its bootloader.
    Bootloader,
    /// Read the input channel.
    Input,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Returns `Ok(false)` when at least one device operation failed.
fn run(cli: Cli) -> CliResult<bool> {
    let config = match &cli.config {
        Some(path) => DriverConfig::load(path)?,
        None => DriverConfig::default(),
    };

    match cli.command {
        Commands::List => {
            list_ports()?;
            Ok(true)
        }
        Commands::Demo { rounds } => for_each_device(cli.port, &config, |dog| demo(dog, rounds)),
        Commands::Device(command) => for_each_device(cli.port, &config, |dog| single(dog, &command)),
    }
}

/// Run `op` on `port`, or on every discovered watchdog when no port is given.
fn for_each_device(port: Option<String>, config: &DriverConfig, op: impl Fn(&WatchDog) -> bool) -> CliResult<bool> {
    let names = match port {
        Some(port) => vec![port],
        None => discovery::enumerate()?,
    };
    if names.is_empty() {
        return Err("no watchdog found".into());
    }
    info!(devices = ?names, "using");

    let mut all_ok = true;
    for name in names {
        let dog = WatchDog::with_config(name, config.clone());
        all_ok &= op(&dog);
    }
    Ok(all_ok)
}

fn list_ports() -> CliResult<()> {
    let ports = discovery::scan_ports()?;
    if ports.is_empty() {
        println!("no USB serial ports");
    }
    for port in ports {
        let marker = if port.is_watchdog() { " watchdog" } else { "" };
        println!("{}  {}:{}{}", port.name, port.vid, port.pid, marker);
    }
    Ok(())
}

/// Run one operation and print its outcome.
fn single(dog: &WatchDog, command: &DeviceCommand) -> bool {
    let outcome = (|| -> CliResult<String> {
        let text = match command {
            DeviceCommand::Ping => {
                dog.ping()?;
                "OK".to_string()
            }
            DeviceCommand::Version => dog.version()?,
            DeviceCommand::Params { yaml: false } => format!("\n{}", dog.read_params()?),
            DeviceCommand::Params { yaml: true } => format!("\n{}", ParamsFile::to_yaml(&dog.read_params()?)?),
            DeviceCommand::WriteParams { file } => {
                let params = ParamsFile::load(file)?;
                dog.write_params(&params)?;
                "OK".to_string()
            }
            DeviceCommand::Touch { channel } => ok(dog.touch(*channel))?,
            DeviceCommand::On { channel } => ok(dog.turn_on(*channel))?,
            DeviceCommand::Off { channel } => ok(dog.turn_off(*channel))?,
            DeviceCommand::Pause { state } => ok(dog.pause(*state))?,
            DeviceCommand::Light { state } => ok(dog.light(*state))?,
            DeviceCommand::Reset => ok(dog.reset())?,
            DeviceCommand::HardReset => ok(dog.hard_reset())?,
            DeviceCommand::PowerOff => ok(dog.power_off())?,
            DeviceCommand::Bootloader => ok(dog.enter_bootloader())?,
            DeviceCommand::Input => String::from_utf8_lossy(&dog.read_input()?).into_owned(),
        };
        Ok(text)
    })();

    match outcome {
        Ok(text) => {
            println!("{}: {}", dog.name(), text);
            true
        }
        Err(err) => {
            println!("{}: {}", dog.name(), err);
            false
        }
    }
}

fn ok(result: watchdog_driver::Result<()>) -> watchdog_driver::Result<String> {
    result.map(|()| "OK".to_string())
}

/// Print a demo step as `LABEL: OK` or `LABEL: <error>`.
fn step(label: &str, result: watchdog_driver::Result<()>) -> bool {
    match result {
        Ok(()) => {
            println!("{label}: OK");
            true
        }
        Err(err) => {
            println!("{label}: {err}");
            false
        }
    }
}

/// Exercise the device according to its channel modes.
fn demo(dog: &WatchDog, rounds: u32) -> bool {
    match dog.version() {
        Ok(version) => println!("{} : {}", dog.name(), version),
        Err(err) => println!("{} : {}", dog.name(), err),
    }

    let params = match dog.read_params() {
        Ok(params) => params,
        Err(err) => {
            warn!(port = dog.name(), %err, "cannot read parameters, skipping demo");
            println!("{err}");
            return false;
        }
    };
    print!("{params}");

    let mut all_ok = true;
    for round in 1..=rounds {
        info!(port = dog.name(), round, "demo round");
        all_ok &= step("PING", dog.ping().map(|_| ()));

        match params.channel1 {
            RelayMode::Reset => {
                all_ok &= step("TOUCH 1", dog.touch(Channel::One));
                all_ok &= step("RESET", dog.reset());
            }
            RelayMode::Open | RelayMode::Close => {
                all_ok &= step("TURN ON", dog.turn_on(Channel::One));
                all_ok &= step("TURN OFF", dog.turn_off(Channel::One));
            }
            _ => {}
        }

        match params.channel2 {
            RelayMode::Power => {
                all_ok &= step("CONTROL 2", dog.touch(Channel::Two));
                all_ok &= step("HARD RESET", dog.hard_reset());
                all_ok &= step("POWER OFF", dog.power_off());
            }
            RelayMode::Open | RelayMode::Close => {
                all_ok &= step("TURN ON", dog.turn_on(Channel::Two));
                all_ok &= step("TURN OFF", dog.turn_off(Channel::Two));
            }
            _ => {}
        }

        all_ok &= step("PAUSE ON", dog.pause(SwitchState::On));
        thread::sleep(Duration::from_secs(1));
        all_ok &= step("PAUSE OFF", dog.pause(SwitchState::Off));
    }
    all_ok
}
