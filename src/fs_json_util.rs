use std::{
    fmt::Debug,
    io::{BufReader, BufWriter, Write},
    path::PathBuf,
};

use anyhow::Context;
use fs_err::File;
use serde::{Deserialize, Serialize};

pub fn read_json<P: Into<PathBuf> + Debug, T: for<'de> Deserialize<'de>>(
    path: P,
) -> anyhow::Result<T> {
    let path = path.into();
    let read = || {
        let reader = BufReader::new(File::open(&path)?);
        anyhow::Ok(serde_json::from_reader::<_, T>(reader)?)
    };
    read().with_context(|| {
        format!(
            "While trying to load {path:?} as {}",
            std::any::type_name::<T>()
        )
    })
}

/// Creates or truncates `path` and writes compact JSON.  The write is not atomic.
pub fn write_json<P: Into<PathBuf>, T: Serialize>(path: P, value: &T) -> anyhow::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer(&mut writer, value)?;
    writer.flush()?;
    Ok(())
}
