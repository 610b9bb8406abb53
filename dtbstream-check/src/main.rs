// dtbstream
// Copyright (c) 2026 The dtbstream Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

#![warn(rust_2018_idioms)]
#![forbid(unsafe_code)]

//! dtbstream QA tool: decodes a capture file end to end and reports
//! record/event/pixel error tallies as JSON, the way a continuous-integration
//! job would gate a capture against regressions without needing a reference
//! decoder to diff against.

use std::fs::File;
use std::io::{self, Read};
use std::process;

use clap::{Parser, ValueEnum};
use log::warn;
use serde::Serialize;

use dtbstream_core::{AnalogLevelDecoder, DeviceType, EventDecoder, Result, StreamError};
use dtbstream_daq::FileSource;
use dtbstream_format::{ModRecordScanner, RocRecordScanner};
use dtbstream_codec::{ModDigDecoder, RocAnaDecoder, RocDigDecoder};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DeviceArg {
    RocDig,
    RocAna,
    ModDig,
}

/// Decode a capture file and report record/event/pixel error tallies.
#[derive(Parser)]
#[command(name = "dtbstream-check", version, about)]
struct Cli {
    /// Wire dialect the capture was recorded under.
    #[arg(value_enum)]
    device: DeviceArg,

    /// Path to a raw little-endian u16 capture file, or "-" for stdin.
    input: String,

    /// Ultra-black calibration reference, analog ROC only.
    #[arg(long, default_value_t = -400)]
    ublack: i32,

    /// Black calibration reference, analog ROC only.
    #[arg(long, default_value_t = 0)]
    black: i32,

    /// Exit with a non-zero status if any event reports an error.
    #[arg(long)]
    fail_on_error: bool,
}

/// Tallied outcome of decoding an entire capture, serialized as the tool's
/// report.
#[derive(Default, Serialize)]
struct Report {
    device_type: &'static str,
    n_events: u64,
    n_events_with_error: u64,
    n_rocs: u64,
    n_rocs_with_error: u64,
    n_pixels: u64,
    n_pixels_with_error: u64,
    n_pixels_out_of_range: u64,
    /// Tally of each `error_bits` flag across every decoded pixel, keyed by
    /// its hex value.
    pixel_error_bit_counts: std::collections::BTreeMap<String, u64>,
}

impl Report {
    fn new(device_type: &'static str) -> Self {
        Report { device_type, ..Default::default() }
    }

    fn observe(&mut self, event: &dtbstream_core::Event) {
        self.n_events += 1;
        if event.error != 0 {
            self.n_events_with_error += 1;
        }
        for roc in &event.rocs {
            self.n_rocs += 1;
            if roc.error != 0 {
                self.n_rocs_with_error += 1;
            }
            for pixel in &roc.pixels {
                self.n_pixels += 1;
                if pixel.error != 0 {
                    self.n_pixels_with_error += 1;
                    for bit in 0u16..16 {
                        let mask = 1u16 << bit;
                        if pixel.error & mask != 0 {
                            *self
                                .pixel_error_bit_counts
                                .entry(format!("{:#04x}", mask))
                                .or_insert(0) += 1;
                        }
                    }
                }
                if !pixel.in_range() {
                    self.n_pixels_out_of_range += 1;
                }
            }
        }
    }
}

fn open_input(path: &str) -> io::Result<Box<dyn Read>> {
    if path == "-" {
        Ok(Box::new(io::stdin()))
    } else {
        Ok(Box::new(File::open(path)?))
    }
}

fn build_decoder(cli: &Cli, source: FileSource<Box<dyn Read>>) -> Box<dyn EventDecoder> {
    match cli.device {
        DeviceArg::RocDig => Box::new(RocDigDecoder::new(RocRecordScanner::new(source))),
        DeviceArg::RocAna => {
            let mut level = AnalogLevelDecoder::new();
            level.calibrate(cli.ublack, cli.black);
            Box::new(RocAnaDecoder::new(RocRecordScanner::new(source), level))
        }
        DeviceArg::ModDig => Box::new(ModDigDecoder::new(ModRecordScanner::new(source))),
    }
}

fn device_name(device: DeviceArg) -> &'static str {
    match device {
        DeviceArg::RocDig => "roc-dig",
        DeviceArg::RocAna => "roc-ana",
        DeviceArg::ModDig => "mod-dig",
    }
}

fn run(cli: &Cli) -> Result<Report> {
    let input = open_input(&cli.input)?;
    let source = FileSource::new(input);
    let mut decoder = build_decoder(cli, source);
    let mut report = Report::new(device_name(cli.device));

    loop {
        match decoder.read() {
            Ok(event) => {
                // `decoder.read()`'s device_type mirrors the CLI flag; assert
                // it to catch a scanner/decoder mismatch early.
                debug_assert!(
                    event.device_type.is_none() || event.device_type == Some(expected_device(cli.device))
                );
                report.observe(event);
            }
            Err(StreamError::Empty) => break,
            Err(err) => return Err(err),
        }
    }
    Ok(report)
}

fn expected_device(device: DeviceArg) -> DeviceType {
    match device {
        DeviceArg::RocDig => DeviceType::RocDig,
        DeviceArg::RocAna => DeviceType::RocAna,
        DeviceArg::ModDig => DeviceType::ModDig,
    }
}

fn main() {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let report = match run(&cli) {
        Ok(report) => report,
        Err(err) => {
            warn!("{}", err);
            process::exit(2);
        }
    };

    match serde_json::to_writer_pretty(io::stdout(), &report) {
        Ok(()) => println!(),
        Err(err) => {
            warn!("failed to write report: {}", err);
            process::exit(2);
        }
    }

    if cli.fail_on_error && report.n_events_with_error > 0 {
        process::exit(1);
    }
}
