//! Bring up a SIM800 module on a Raspberry Pi, print its state, set its clock
//! and optionally send an SMS.
//!
//! ```text
//! RUST_LOG=debug sim800-demo --port /dev/ttyAMA0 --sms-to +441234567890
//! ```

use std::process::ExitCode;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{bail, Context};
use clap::Parser;
use linux_embedded_hal::gpio_cdev::{Chip, LineRequestFlags};
use linux_embedded_hal::{CdevPin, Delay};
use log::{error, info};
use sim800::{Config, PowerController, SerialTransport, Sim800};

#[derive(Debug, Parser)]
#[command(about = "Drive a SIM800 module over a serial port")]
struct Args {
    /// Serial device the module is attached to
    #[arg(long, default_value = "/dev/ttyAMA0")]
    port: String,

    #[arg(long, default_value_t = 9600)]
    baud: u32,

    /// GPIO character device holding the power and reset lines
    #[arg(long, default_value = "/dev/gpiochip0")]
    gpio_chip: String,

    /// Line offset of the power key (board pin 11)
    #[arg(long, default_value_t = 17)]
    power_line: u32,

    /// Line offset of the reset line (board pin 12)
    #[arg(long, default_value_t = 18)]
    reset_line: u32,

    /// Let the network set the module clock
    #[arg(long)]
    sync_network_time: bool,

    /// Send an SMS to this number
    #[arg(long)]
    sms_to: Option<String>,

    #[arg(long, default_value = "Hello World!")]
    message: String,
}

fn output_pin(chip: &mut Chip, offset: u32) -> anyhow::Result<CdevPin> {
    let handle = chip
        .get_line(offset)
        .and_then(|line| line.request(LineRequestFlags::OUTPUT, 0, "sim800"))
        .with_context(|| format!("Failed to request GPIO line {}", offset))?;
    Ok(CdevPin::new(handle)?)
}

fn run(args: &Args, interrupted: &AtomicBool) -> anyhow::Result<()> {
    let config = Config::new();

    let mut chip = Chip::new(&args.gpio_chip)
        .with_context(|| format!("Failed to open {}", args.gpio_chip))?;
    let power = output_pin(&mut chip, args.power_line)?;
    let reset = output_pin(&mut chip, args.reset_line)?;
    let power = PowerController::new(power, reset, Delay, &config)?;

    let transport = SerialTransport::open(&args.port, args.baud)
        .with_context(|| format!("Failed to open {}", args.port))?;

    // Dropping `sim` on any return below drives the power lines low
    let mut sim = Sim800::new(transport, power, config);

    macro_rules! checkpoint {
        () => {
            if interrupted.load(Ordering::SeqCst) {
                bail!("Interrupted");
            }
        };
    }

    sim.turn_on()?;
    checkpoint!();
    if !sim.set_echo_off()? {
        bail!("Failed to switch off echo");
    }
    info!("Good to go!");

    checkpoint!();
    println!("IMEI: {:?}", sim.imei()?);
    println!("Firmware: {:?}", sim.firmware_version()?);
    println!("ICCID: {:?}", sim.sim_ccid()?);
    println!("Last error: {:?}", sim.last_error()?);
    checkpoint!();
    println!("Network: {:?}", sim.network_status()?);
    println!("RSSI: {:?}", sim.rssi()?);

    if args.sync_network_time {
        println!("Network time sync: {}", sim.enable_network_time_sync(true)?);
    }

    checkpoint!();
    println!("Time: {:?}", sim.time()?);
    let now = chrono::Utc::now().naive_utc();
    println!("Set time {}: {}", now, sim.set_time(&now)?);
    println!("Time: {:?}", sim.time()?);

    if let Some(number) = &args.sms_to {
        checkpoint!();
        println!("SMS sent: {}", sim.send_sms(number, &args.message)?);
        println!("Last error: {:?}", sim.last_error()?);
    }

    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let interrupted = Arc::new(AtomicBool::new(false));
    let flag = interrupted.clone();
    if let Err(e) = ctrlc::set_handler(move || flag.store(true, Ordering::SeqCst)) {
        error!("Failed to install Ctrl-C handler: {}", e);
    }

    match run(&args, &interrupted) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
