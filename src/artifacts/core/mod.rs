//! Core utilities and shared types
//!
//! Output plumbing shared by the commands.

use derive_new::new;
use minus::Pager;
use std::io::{self, Write};

/// Wrapper that implements `Write` for the minus pager
///
/// Lets `log` and `global-log` write into the pager through the same
/// `Box<dyn Write>` the repository uses for stdout. The buffered text is shown once
/// the command finishes, via [`page`].
#[derive(new)]
pub struct PagerWriter {
    pager: Pager,
}

impl Write for PagerWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let s =
            std::str::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        self.pager.push_str(s).map_err(io::Error::other)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Whether long output should go through the pager
///
/// Only when stdout is a terminal and `NO_PAGER` is not set.
pub fn should_page(stdout_is_terminal: bool) -> bool {
    stdout_is_terminal && std::env::var_os("NO_PAGER").is_none()
}

/// Display everything written into `pager` and block until the user quits
pub fn page(pager: Pager) -> anyhow::Result<()> {
    pager.set_prompt("gitlet")?;
    minus::page_all(pager)?;

    Ok(())
}
