use crate::config::RendererMode;

/// Outcome of probing what the host terminal can display.
#[derive(Debug, Clone)]
pub struct CapabilityReport {
    pub auto_probe: bool,
    pub requested_renderer: RendererMode,
    pub renderer: RendererMode,
    pub truecolor: bool,
    notes: Vec<String>,
}

impl CapabilityReport {
    pub fn changed(&self) -> bool {
        self.renderer != self.requested_renderer
    }

    pub fn notes(&self) -> &[String] {
        &self.notes
    }

    pub fn push_note(&mut self, note: impl Into<String>) {
        self.notes.push(note.into());
    }

    pub fn status_label(&self) -> String {
        if !self.auto_probe {
            return format!("off (renderer={:?})", self.renderer);
        }
        if self.changed() {
            return format!(
                "fallback ren {:?}->{:?}",
                self.requested_renderer, self.renderer
            );
        }
        format!("ok ren={:?}", self.renderer)
    }
}

/// Pick a renderer the terminal can show. `colorterm` is the `COLORTERM` value, if any.
pub fn probe_renderer(
    requested: RendererMode,
    auto_probe: bool,
    colorterm: Option<&str>,
) -> CapabilityReport {
    let truecolor = truecolor_available(colorterm);
    let mut report = CapabilityReport {
        auto_probe,
        requested_renderer: requested,
        renderer: requested,
        truecolor,
        notes: Vec::new(),
    };

    if !auto_probe {
        report.push_note("capability probe disabled by --auto-probe=false");
        return report;
    }

    if requested == RendererMode::HalfBlock && !truecolor {
        report.renderer = RendererMode::Ascii;
        report.push_note("24-bit color not advertised; falling back to ascii renderer");
    }

    if report.notes.is_empty() {
        report.push_note("probe selected requested renderer with no fallback");
    }
    report
}

/// Probe using the process environment.
pub fn probe_runtime(requested: RendererMode, auto_probe: bool) -> CapabilityReport {
    let colorterm = std::env::var("COLORTERM").ok();
    probe_renderer(requested, auto_probe, colorterm.as_deref())
}

fn truecolor_available(colorterm: Option<&str>) -> bool {
    if let Ok(v) = std::env::var("GALLERY_FORCE_TRUECOLOR") {
        match v.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => return true,
            "0" | "false" | "no" | "off" => return false,
            _ => {}
        }
    }
    let Some(ct) = colorterm else {
        return false;
    };
    let ct = ct.trim().to_ascii_lowercase();
    ct == "truecolor" || ct == "24bit"
}
