// This code is part of star-route.
//
// This code is licensed under the Apache License, Version 2.0. You may
// obtain a copy of this license in the LICENSE.txt file in the root directory
// of this source tree or at http://www.apache.org/licenses/LICENSE-2.0.

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the `star-route` binary: instance-file I/O on top
/// of [`star_route_core::CoreError`].
#[derive(Debug, Error)]
pub enum CliError {
    #[error("failed to open instance file {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("instance file {path:?} has no \"p <k> <m>\" line")]
    MissingHeader { path: PathBuf },

    #[error("instance file {path:?} has a malformed \"p\" line: {line:?}")]
    BadHeader { path: PathBuf, line: String },

    #[error("instance file {path:?} has {found} state lines, expected {expected}")]
    WrongLineCount {
        path: PathBuf,
        found: usize,
        expected: usize,
    },

    #[error("instance file {path:?} has a malformed state line: {line:?}")]
    BadLine { path: PathBuf, line: String },

    #[error(transparent)]
    Core(#[from] star_route_core::CoreError),
}

pub type CliResult<T> = Result<T, CliError>;
