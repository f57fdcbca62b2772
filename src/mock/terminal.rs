use std::io::{self, Write};

use super::{MockPin, ScriptedAttributes};
use crate::chip::DETECTION_THRESHOLD;
use crate::polling::{OUT_PIN_NAME, POLL_INTERVAL, PolledSensor};
use crate::{Attribute, AttributeSource, InputChange};

type Simulator = PolledSensor<ScriptedAttributes, MockPin>;

/// Clears the screen and moves cursor to top-left.
#[inline]
fn clear_screen() {
    print!("\x1B[2J\x1B[H");
}

fn new_simulator() -> Simulator {
    let (sim, _) = PolledSensor::init(ScriptedAttributes::new(), MockPin::new());
    sim
}

/// Runs an interactive terminal interface for the simulated A3144.
///
/// Each mutating command is followed by one poll tick, the same way the
/// simulator's timer would pick the change up on its next period.
pub fn run_interactive_terminal() {
    let mut sim = new_simulator();
    let mut last_change: Option<InputChange> = None;

    clear_screen();
    draw_interface(&sim, last_change.as_ref());

    loop {
        print!("> ");
        if let Err(e) = io::stdout().flush() {
            eprintln!("Failed to flush stdout: {}", e);
            break;
        }

        let mut input = String::new();
        match io::stdin().read_line(&mut input) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                eprintln!("Failed to read input: {}", e);
                break;
            }
        }

        let parts: Vec<&str> = input.split_whitespace().collect();
        if parts.is_empty() {
            continue;
        }

        match parts[0] {
            "f" | "i" => {
                let attribute = if parts[0] == "f" {
                    Attribute::MagneticField
                } else {
                    Attribute::OutputInverted
                };
                match parts.get(1).map(|v| v.parse::<u32>()) {
                    Some(Ok(value)) => {
                        sim.attributes_mut().set(attribute, value);
                        last_change = sim.tick().or(last_change);
                        clear_screen();
                        draw_interface(&sim, last_change.as_ref());
                    }
                    Some(Err(e)) => println!("Invalid value: {}", e),
                    None => println!("Usage: {} <value>", parts[0]),
                }
            }
            "s" => {
                let script = input.trim_start()[1..].trim();
                match sim.attributes_mut().push_script(script) {
                    Ok(()) => println!("Queued {} batch(es)", sim.attributes().pending()),
                    Err(e) => println!("❌ {}", e),
                }
            }
            "t" => {
                sim.attributes_mut().tick();
                last_change = sim.tick().or(last_change);
                clear_screen();
                draw_interface(&sim, last_change.as_ref());
            }
            "r" => {
                sim.deinit();
                sim = new_simulator();
                last_change = None;
                clear_screen();
                draw_interface(&sim, last_change.as_ref());
                println!("\n🔄 Reset to initial state");
            }
            "p" => {
                clear_screen();
                draw_interface(&sim, last_change.as_ref());
            }
            "q" => break,
            _ => println!("Unknown command"),
        }
    }

    sim.deinit();
}

/// Draws the complete interface: help text, attributes, and the output pin.
fn draw_interface(sim: &Simulator, last_change: Option<&InputChange>) {
    let sensor = sim.sensor();
    let attributes = sim.attributes();

    println!("🧲 A3144 Hall Effect Sensor Simulator");
    println!();
    println!(
        "Commands: f <strength> | i <0|1> | s <script> | t (tick) | r (reset) | p (refresh) | q (quit)"
    );
    println!(
        "Poll interval: {} ms | Detection threshold: > {}",
        POLL_INTERVAL.as_millis(),
        DETECTION_THRESHOLD
    );
    println!();

    println!("╔══════════════════════╦══════════════╗");
    println!("║ Attribute            ║ Value        ║");
    println!("╠══════════════════════╬══════════════╣");
    for attribute in Attribute::ALL {
        println!(
            "║ {:<20} ║ {:<12} ║",
            attribute.name(),
            attributes.read(attribute)
        );
    }
    println!("╠══════════════════════╬══════════════╣");
    println!(
        "║ {:<20} ║ {:<12} ║",
        "field detected",
        if sensor.magnetic_field_present() { "yes" } else { "no" }
    );
    println!(
        "║ {:<20} ║ {:<12} ║",
        "mode",
        if sensor.output_inverted() { "active LOW" } else { "active HIGH" }
    );
    println!(
        "║ {:<20} ║ {:<12} ║",
        format!("{OUT_PIN_NAME} pin"),
        sensor.output_level().to_string()
    );
    println!("╚══════════════════════╩══════════════╝");

    println!(
        "Pin writes: {} | Pending batches: {}",
        sim.pin().writes().len(),
        attributes.pending()
    );
    if let Some(change) = last_change {
        println!("Last change: {}", change);
    }
}
