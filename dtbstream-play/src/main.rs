// dtbstream
// Copyright (c) 2026 The dtbstream Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

#![warn(rust_2018_idioms)]
#![forbid(unsafe_code)]

//! Replays a raw DTB capture file through the decoding pipeline and prints
//! the resulting events, picking the wire dialect/decoder pair at runtime
//! from a CLI flag — the scenario the pipeline's object-safe stage traits
//! (spec §9) are designed around.

use std::fs::File;
use std::io::{self, Read};
use std::process;

use clap::{Parser, ValueEnum};
use log::error;

use dtbstream_core::{AnalogLevelDecoder, EventDecoder, Result, StreamError};
use dtbstream_daq::FileSource;
use dtbstream_format::{ModRecordScanner, RocRecordScanner};
use dtbstream_codec::{ModDigDecoder, RocAnaDecoder, RocDigDecoder};
use dtbstream_pipes::EventPrinter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DeviceArg {
    RocDig,
    RocAna,
    ModDig,
}

/// Replay a raw DTB capture and print the decoded events.
#[derive(Parser)]
#[command(name = "dtbstream-play", version, about)]
struct Cli {
    /// Wire dialect the capture was recorded under.
    #[arg(value_enum)]
    device: DeviceArg,

    /// Path to a raw little-endian u16 capture file, or "-" for stdin.
    input: String,

    /// Only print events carrying an error.
    #[arg(long)]
    errors_only: bool,

    /// Ultra-black calibration reference, analog ROC only.
    #[arg(long, default_value_t = -400)]
    ublack: i32,

    /// Black calibration reference, analog ROC only.
    #[arg(long, default_value_t = 0)]
    black: i32,
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

fn run(cli: &Cli) -> Result<()> {
    let input = open_input(&cli.input)?;
    let source = FileSource::new(input);
    let decoder = build_decoder(cli, source);
    let mut printer = EventPrinter::new(decoder, io::stdout(), cli.errors_only);

    loop {
        match printer.read() {
            Ok(_) => {}
            Err(StreamError::Empty) => break,
            Err(err) => return Err(err),
        }
    }
    Ok(())
}

fn main() {
    pretty_env_logger::init();
    let cli = Cli::parse();
    if let Err(err) = run(&cli) {
        error!("{}", err);
        process::exit(1);
    }
}
