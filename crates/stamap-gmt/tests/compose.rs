//! Planning and rendering against a recording runner.

use stamap_cpt::Palette;
use stamap_dem::Region;
use stamap_gmt::{
    GmtCall, GmtError, GmtRunner, InsetPosition, InsetRequest, MapComposer, MapRequest,
    MapStyle, OutputFormat, INSET_OUTLINE_FILE, PALETTE_FILE,
};
use stamap_inventory::Station;
use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

/// Records every call; writes the figure on `end`; optionally fails one module.
#[derive(Default)]
struct RecordingRunner {
    calls: RefCell<Vec<GmtCall>>,
    workdirs: RefCell<Vec<PathBuf>>,
    fail_on: Option<&'static str>,
    palette_seen: RefCell<Option<String>>,
}

impl RecordingRunner {
    fn failing(module: &'static str) -> Self {
        Self {
            fail_on: Some(module),
            ..Self::default()
        }
    }

    fn modules(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|c| c.module.clone()).collect()
    }
}

impl GmtRunner for RecordingRunner {
    fn run(&self, call: &GmtCall, workdir: &Path) -> stamap_gmt::Result<()> {
        self.calls.borrow_mut().push(call.clone());
        self.workdirs.borrow_mut().push(workdir.to_path_buf());

        if call.module == "grdimage" && self.palette_seen.borrow().is_none() {
            *self.palette_seen.borrow_mut() = fs::read_to_string(workdir.join(PALETTE_FILE)).ok();
        }
        if self.fail_on == Some(call.module.as_str()) {
            return Err(GmtError::CommandFailed {
                module: call.module.clone(),
                status: "exit status: 70".to_string(),
                stderr: "simulated failure".to_string(),
            });
        }
        if call.is_end() {
            // begin args: name, format[, options]
            let begin = self.calls.borrow()[0].clone();
            let file = format!("{}.{}", begin.args[0], begin.args[1]);
            fs::write(workdir.join(file), b"figure")?;
        }
        Ok(())
    }
}

fn stations() -> Vec<Station> {
    [("BJ", "BAJ", 115.0, 39.0), ("BJ", "CHP", 118.0, 42.0), ("HE", "ZJK", 116.5, 40.2)]
        .into_iter()
        .map(|(net, code, lon, lat)| Station {
            network: net.to_string(),
            code: code.to_string(),
            latitude: lat,
            longitude: lon,
            elevation: Some(50.0),
        })
        .collect()
}

fn request() -> MapRequest {
    let palette: Palette = "-500 0 0 255 0 0 128 255\n0 0 128 0 3000 255 255 255\nB 0 0 0\nF 255 255 255\nN 128 128 128\n"
        .parse()
        .unwrap();
    MapRequest::new(
        "/cache/relief.nc",
        "114.5/118.5/38.5/42.5".parse().unwrap(),
        palette,
        stations(),
    )
}

fn full_request() -> MapRequest {
    let mut req = request();
    req.labels = true;
    req.title = Some("Station Map".to_string());
    req.colorbar = true;
    req.inset = Some(InsetRequest {
        grid: PathBuf::from("/cache/inset.nc"),
        region: "109.5/123.5/33.5/47.5".parse::<Region>().unwrap(),
        position: "jTL+o0.2c".parse::<InsetPosition>().unwrap(),
    });
    req
}

#[test]
fn test_full_plan_order() {
    let plan = MapComposer::new().plan(&full_request());
    assert_eq!(
        plan.modules(),
        [
            "begin", "set", "grdimage", "coast", "plot", "text", "basemap", "colorbar",
            "inset begin", "grdimage", "coast", "plot", "inset end", "end",
        ]
    );

    let inset_begin = &plan.calls[8];
    assert_eq!(inset_begin.option('D'), Some("jTL+o0.2c+w5c"));

    let inset_image = &plan.calls[9];
    assert!(inset_image.has_arg("/cache/inset.nc"));
    assert_eq!(inset_image.option('C'), Some(PALETTE_FILE));
    assert_eq!(inset_image.option('R'), Some("109.5/123.5/33.5/47.5"));

    let outline = plan.files.iter().find(|f| f.name == INSET_OUTLINE_FILE).unwrap();
    assert_eq!(outline.contents.lines().count(), 5);
    assert_eq!(outline.contents.lines().next(), Some("114.5 38.5"));
}

#[test]
fn test_optional_calls_only_when_requested() {
    let plan = MapComposer::new().plan(&request());
    let modules = plan.modules();
    for optional in ["text", "colorbar", "inset begin", "inset end"] {
        assert!(!modules.iter().any(|m| m == optional), "{}", optional);
    }
    assert_eq!(modules.last().map(String::as_str), Some("end"));
}

#[test]
fn test_style_flows_into_calls() {
    let mut req = full_request();
    req.style = MapStyle {
        projection: "M12c".to_string(),
        marker: "i0.4c".to_string(),
        colorbar_position: "JBC+w8c".to_string(),
        ..MapStyle::default()
    };
    let plan = MapComposer::new().plan(&req);
    assert_eq!(plan.calls[2].option('J'), Some("M12c"));
    let plot = plan.calls.iter().find(|c| c.module == "plot").unwrap();
    assert_eq!(plot.option('S'), Some("i0.4c"));
    let colorbar = plan.calls.iter().find(|c| c.module == "colorbar").unwrap();
    assert_eq!(colorbar.option('D'), Some("JBC+w8c"));
}

#[test]
fn test_render_writes_output() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("out").join("map.jpeg");
    let mut req = full_request();
    req.format = OutputFormat::from_path(&output).unwrap();

    let composer = MapComposer::new();
    let plan = composer.plan(&req);
    let runner = RecordingRunner::default();
    let written = composer.render(&plan, &runner, &output).unwrap();

    assert_eq!(written, output);
    assert_eq!(fs::read(&output).unwrap(), b"figure");
    assert_eq!(runner.calls.borrow().len(), plan.calls.len());

    // One session directory for every call, gone afterwards.
    let workdirs = runner.workdirs.borrow();
    assert!(workdirs.iter().all(|w| *w == workdirs[0]));
    assert!(!workdirs[0].exists());

    // Palette was written before the first grdimage ran.
    let palette = runner.palette_seen.borrow().clone().unwrap();
    assert!(palette.starts_with("-500\t0 0 255\t0\t0 128 255\n"), "{}", palette);
    assert!(palette.contains("B\t0 0 0\n"), "{}", palette);
}

#[test]
fn test_failing_call_leaves_no_output() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("map.png");
    let composer = MapComposer::new();
    let plan = composer.plan(&full_request());
    let runner = RecordingRunner::failing("colorbar");

    let err = composer.render(&plan, &runner, &output).unwrap_err();
    assert!(matches!(err, GmtError::CommandFailed { ref module, .. } if module == "colorbar"));
    assert!(!output.exists());

    // The session was still closed.
    let modules = runner.modules();
    assert_eq!(modules.last().map(String::as_str), Some("end"));
    assert!(!modules.iter().any(|m| m == "inset"));
    assert!(!runner.workdirs.borrow()[0].exists());
}

#[test]
fn test_failing_end_leaves_no_output() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("map.pdf");
    let mut req = request();
    req.format = OutputFormat::Pdf;
    let composer = MapComposer::new();
    let plan = composer.plan(&req);
    let runner = RecordingRunner::failing("end");

    assert!(composer.render(&plan, &runner, &output).is_err());
    assert!(!output.exists());
    assert_eq!(runner.modules().iter().filter(|m| *m == "end").count(), 1);
}

#[test]
fn test_render_rejects_unframed_plan() {
    let dir = tempfile::tempdir().unwrap();
    let composer = MapComposer::new();
    let mut plan = composer.plan(&request());
    plan.calls.pop();

    let runner = RecordingRunner::default();
    let err = composer
        .render(&plan, &runner, &dir.path().join("map.png"))
        .unwrap_err();
    assert!(matches!(err, GmtError::InvalidPlan));
    assert!(runner.calls.borrow().is_empty());
}
