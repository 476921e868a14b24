/*!
Demo log generation for the scribe CLI.

Produces a self-contained log file that looks like ordinary application
output but carries three embedded payloads: a JSON configuration document, a
small gradient BMP image built in code, and a shell transcript. Every wire
line is prefixed with a wall-clock timestamp the way real log frameworks
would emit it, which also exercises the marker-anywhere matching on the
consuming side.
*/

use std::path::PathBuf;

use chrono::{DateTime, Duration, Local};
use clap::Args;
use richlog::{encode_command, encode_config, encode_image, EncodeOptions};
use serde_json::json;

use crate::CommandHandler;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Demo log generation subcommand arguments.
#[derive(Debug, Clone, Args)]
#[command(name = "generate")]
pub struct GenerateSubCommand {
    /// Output log file
    #[arg(short = 'o', long = "output", default_value = "sample.log")]
    output: String,
}

impl CommandHandler for GenerateSubCommand {
    /// Build the demo log and write it to the output path.
    fn handle(self) -> crate::error::Result<()> {
        let output = PathBuf::from(shellexpand::tilde(&self.output).into_owned());
        let log_lines = build_demo_log()?;
        std::fs::write(&output, log_lines.join("\n"))?;
        log::info!(
            "Generated demo log with {} lines at {}",
            log_lines.len(),
            output.display()
        );
        Ok(())
    }
}

/// Assemble the full demo log: three embedded payloads interleaved with
/// ordinary application lines.
fn build_demo_log() -> crate::error::Result<Vec<String>> {
    let options = EncodeOptions::default();
    let base = Local::now();

    let config_lines = encode_config(&sample_config().to_string(), &options)?;
    let image_lines = encode_image(&gradient_bmp(200, 100), &options)?;
    let command_lines = encode_command(SAMPLE_TRANSCRIPT, &options)?;

    let mut log_lines = vec![plain_line(base, "service started")];
    log_lines.extend(stamped_lines(config_lines, base + Duration::seconds(1)));
    log_lines.push(plain_line(base + Duration::seconds(2), "configuration loaded"));
    log_lines.push(plain_line(
        base + Duration::minutes(15),
        "anomaly detected, capturing diagnostic snapshot",
    ));
    log_lines.extend(stamped_lines(
        image_lines,
        base + Duration::minutes(15) + Duration::seconds(1),
    ));
    log_lines.push(plain_line(
        base + Duration::minutes(16),
        "snapshot recorded",
    ));
    log_lines.push(plain_line(
        base + Duration::hours(1),
        "running disk space check",
    ));
    log_lines.extend(stamped_lines(
        command_lines,
        base + Duration::hours(1) + Duration::seconds(1),
    ));
    log_lines.push(plain_line(
        base + Duration::hours(1) + Duration::seconds(2),
        "check complete",
    ));

    Ok(log_lines)
}

/// Render one ordinary (non-wire) log line.
fn plain_line(at: DateTime<Local>, message: &str) -> String {
    format!("[{}] {}", at.format(TIMESTAMP_FORMAT), message)
}

/// Prefix each wire line with a strictly increasing millisecond timestamp.
fn stamped_lines(lines: Vec<String>, base: DateTime<Local>) -> Vec<String> {
    lines
        .into_iter()
        .enumerate()
        .map(|(position, line)| {
            let at = base + Duration::milliseconds(position as i64);
            format!("[{}] {}", at.format(TIMESTAMP_FORMAT), line)
        })
        .collect()
}

/// A representative server configuration document.
fn sample_config() -> serde_json::Value {
    json!({
        "server": {
            "port": 8080,
            "host": "localhost",
            "timeout": 30000,
            "debug": true
        },
        "database": {
            "host": "db.example.com",
            "port": 5432,
            "username": "admin",
            "database": "app_db",
            "poolSize": 10,
            "connectionTimeout": 5000
        },
        "logging": {
            "level": "info",
            "file": "/var/log/app.log",
            "rotation": {
                "maxSize": "10MB",
                "maxFiles": 5,
                "compress": true
            }
        },
        "features": {
            "enableCache": true,
            "enableNotifications": true,
            "cacheTime": 3600,
            "maxUploadSize": 52428800
        }
    })
}

/// Build a 24-bit uncompressed BMP with a blue/green gradient over a fixed
/// red channel. Row width is chosen so rows need no 4-byte padding.
fn gradient_bmp(width: u32, height: u32) -> Vec<u8> {
    let pixel_bytes = width * height * 3;
    let file_size = 54 + pixel_bytes;

    let mut bmp = Vec::with_capacity(file_size as usize);

    // File header.
    bmp.extend_from_slice(b"BM");
    bmp.extend_from_slice(&file_size.to_le_bytes());
    bmp.extend_from_slice(&0u32.to_le_bytes()); // reserved
    bmp.extend_from_slice(&54u32.to_le_bytes()); // pixel data offset

    // DIB header.
    bmp.extend_from_slice(&40u32.to_le_bytes());
    bmp.extend_from_slice(&(width as i32).to_le_bytes());
    bmp.extend_from_slice(&(height as i32).to_le_bytes());
    bmp.extend_from_slice(&1u16.to_le_bytes()); // color planes
    bmp.extend_from_slice(&24u16.to_le_bytes()); // bits per pixel
    bmp.extend_from_slice(&0u32.to_le_bytes()); // no compression
    bmp.extend_from_slice(&pixel_bytes.to_le_bytes());
    bmp.extend_from_slice(&2835i32.to_le_bytes()); // horizontal ppm
    bmp.extend_from_slice(&2835i32.to_le_bytes()); // vertical ppm
    bmp.extend_from_slice(&0u32.to_le_bytes()); // palette colors
    bmp.extend_from_slice(&0u32.to_le_bytes()); // important colors

    for y in 0..height {
        for x in 0..width {
            bmp.push((255 * x / width) as u8); // blue gradient
            bmp.push((255 * y / height) as u8); // green gradient
            bmp.push(128); // red fixed
        }
    }

    bmp
}

const SAMPLE_TRANSCRIPT: &str = "$ df -h
Filesystem      Size  Used Avail Use% Mounted on
udev            3.9G     0  3.9G   0% /dev
tmpfs           796M  1.7M  794M   1% /run
/dev/nvme0n1p2  457G  199G  235G  46% /
tmpfs           3.9G  132M  3.8G   4% /dev/shm

$ uptime
 10:46:03 up 2 days,  2:15,  3 users,  load average: 0.52, 0.58, 0.59
";
