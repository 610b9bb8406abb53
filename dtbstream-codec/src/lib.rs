// dtbstream
// Copyright (c) 2026 The dtbstream Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

#![warn(rust_2018_idioms)]
#![forbid(unsafe_code)]

//! Record-to-event decoders: digital ROC (§4.6), analog ROC (§4.7), and
//! TBM-framed digital module (§4.8), all built on the shared pixel raw
//! decoding in [`raw`].

mod mod_dig;
mod raw;
mod roc_ana;
mod roc_dig;
mod tags;

pub use mod_dig::ModDigDecoder;
pub use raw::{decode_ana, decode_raw};
pub use roc_ana::RocAnaDecoder;
pub use roc_dig::RocDigDecoder;
