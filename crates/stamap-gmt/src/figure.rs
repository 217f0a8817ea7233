//! Scoped GMT modern-mode session.

use crate::{GmtCall, GmtError, GmtRunner, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::{debug, warn};

/// An open `gmt begin` ... `gmt end` session.
///
/// The session runs in a private temporary directory. The finished figure
/// is moved to its destination only by [`Figure::finish`]; dropping a figure
/// before that closes the session and deletes the directory together with
/// anything GMT wrote into it.
pub struct Figure<'r, R: GmtRunner + ?Sized> {
    runner: &'r R,
    workdir: TempDir,
    open: bool,
}

impl<'r, R: GmtRunner + ?Sized> Figure<'r, R> {
    /// Create the session directory and run `begin` in it.
    pub fn begin(runner: &'r R, begin: &GmtCall) -> Result<Self> {
        let workdir = tempfile::Builder::new().prefix("stamap-").tempdir()?;
        debug!(workdir = %workdir.path().display(), "opening figure session");
        runner.run(begin, workdir.path())?;
        Ok(Self {
            runner,
            workdir,
            open: true,
        })
    }

    /// Session working directory.
    pub fn workdir(&self) -> &Path {
        self.workdir.path()
    }

    /// Write a data file (palette, points, labels) into the session directory.
    pub fn write_file(&self, name: &str, contents: &str) -> Result<PathBuf> {
        let path = self.workdir.path().join(name);
        fs::write(&path, contents)?;
        Ok(path)
    }

    /// Run one plotting call inside the session.
    pub fn run(&self, call: &GmtCall) -> Result<()> {
        self.runner.run(call, self.workdir.path())
    }

    /// Run `end` and move the produced figure to `output`.
    ///
    /// `produced` is the figure file name GMT writes into the session
    /// directory, e.g. `stamap.png`.
    pub fn finish(mut self, end: &GmtCall, produced: &str, output: &Path) -> Result<PathBuf> {
        let ended = self.runner.run(end, self.workdir.path());
        self.open = false;
        ended?;

        let produced = self.workdir.path().join(produced);
        if !produced.is_file() {
            return Err(GmtError::MissingOutput(produced));
        }
        place_output(&produced, output)?;
        debug!(output = %output.display(), "figure written");
        Ok(output.to_path_buf())
    }
}

impl<R: GmtRunner + ?Sized> Drop for Figure<'_, R> {
    fn drop(&mut self) {
        if self.open {
            warn!("closing unfinished figure session");
            if let Err(e) = self.runner.run(&GmtCall::new("end"), self.workdir.path()) {
                warn!("gmt end failed while discarding figure: {}", e);
            }
        }
    }
}

/// Move `from` to `to`, falling back to copy-then-rename across filesystems.
fn place_output(from: &Path, to: &Path) -> Result<()> {
    if let Some(parent) = to.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    if fs::rename(from, to).is_ok() {
        return Ok(());
    }

    let file_name = to
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let staging = to.with_file_name(format!(".{}.part", file_name));
    fs::copy(from, &staging)?;
    if let Err(e) = fs::rename(&staging, to) {
        let _ = fs::remove_file(&staging);
        return Err(e.into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct Log {
        calls: RefCell<Vec<String>>,
        workdirs: RefCell<Vec<PathBuf>>,
    }

    impl GmtRunner for Log {
        fn run(&self, call: &GmtCall, workdir: &Path) -> Result<()> {
            self.calls.borrow_mut().push(call.module.clone());
            self.workdirs.borrow_mut().push(workdir.to_path_buf());
            if call.is_end() {
                fs::write(workdir.join("fig.png"), b"png")?;
            }
            Ok(())
        }
    }

    #[test]
    fn test_finish_moves_figure() {
        let out_dir = tempfile::tempdir().unwrap();
        let output = out_dir.path().join("maps").join("out.png");
        let log = Log::default();

        let figure = Figure::begin(&log, &GmtCall::new("begin")).unwrap();
        let workdir = figure.workdir().to_path_buf();
        figure.run(&GmtCall::new("basemap")).unwrap();
        figure.finish(&GmtCall::new("end"), "fig.png", &output).unwrap();

        assert_eq!(fs::read(&output).unwrap(), b"png");
        assert!(!workdir.exists());
        assert_eq!(*log.calls.borrow(), ["begin", "basemap", "end"]);
        assert!(log.workdirs.borrow().iter().all(|w| *w == workdir));
    }

    #[test]
    fn test_drop_closes_session_and_cleans_up() {
        let log = Log::default();
        let workdir = {
            let figure = Figure::begin(&log, &GmtCall::new("begin")).unwrap();
            figure.write_file("palette.cpt", "0 0 0 0 1 255 255 255\n").unwrap();
            figure.workdir().to_path_buf()
        };
        assert!(!workdir.exists());
        assert_eq!(*log.calls.borrow(), ["begin", "end"]);
    }

    #[test]
    fn test_missing_figure_is_error() {
        let out_dir = tempfile::tempdir().unwrap();
        let output = out_dir.path().join("out.pdf");
        let log = Log::default();

        let figure = Figure::begin(&log, &GmtCall::new("begin")).unwrap();
        let err = figure
            .finish(&GmtCall::new("end"), "fig.pdf", &output)
            .unwrap_err();
        assert!(matches!(err, GmtError::MissingOutput(_)));
        assert!(!output.exists());
        assert_eq!(log.calls.borrow().len(), 2);
    }
}
