use crate::contrast::sampler::BackgroundStack;
use crate::foundation::color::Rgba8;
use crate::foundation::core::{Point, Viewport};
use crate::foundation::error::{FxError, FxResult};
use std::collections::BTreeSet;
use std::path::Path;

/// A page laid out as colored sections in document coordinates.
///
/// This is the headless stand-in for a rendered document: it answers which backgrounds sit
/// under a point, in paint order.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Page {
    /// Viewport the page is shown in.
    pub viewport: Viewport,
    /// Root background, bottom of every stack when set.
    #[serde(default)]
    pub background: Option<Rgba8>,
    /// Sections in document order.
    #[serde(default)]
    pub sections: Vec<Section>,
}

/// One block of the page.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Section {
    pub id: String,
    /// Document y of the top edge.
    pub top: f64,
    pub height: f64,
    /// Document x of the left edge.
    #[serde(default)]
    pub left: f64,
    /// Width; spans to the right edge of the document when absent.
    #[serde(default)]
    pub width: Option<f64>,
    pub background: Rgba8,
    /// Stacking order; higher paints on top.
    #[serde(default)]
    pub z: i32,
}

impl Section {
    /// Half-open containment: `[left, left + width) x [top, top + height)`.
    pub fn contains(&self, p: Point) -> bool {
        let right = self.width.map_or(f64::INFINITY, |w| self.left + w);
        p.x >= self.left && p.x < right && p.y >= self.top && p.y < self.top + self.height
    }
}

impl Page {
    /// Parse and validate a page from JSON text.
    pub fn from_json_str(s: &str) -> FxResult<Self> {
        let page: Self = serde_json::from_str(s)?;
        page.validate()?;
        Ok(page)
    }

    /// Read, parse and validate a page JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> FxResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            FxError::validation(format!("failed to read page '{}': {e}", path.display()))
        })?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> FxResult<()> {
        Viewport::new(self.viewport.width, self.viewport.height)?;

        let mut seen = BTreeSet::new();
        for s in &self.sections {
            if s.id.trim().is_empty() {
                return Err(FxError::validation("section id must be non-empty"));
            }
            if !seen.insert(s.id.as_str()) {
                return Err(FxError::validation(format!(
                    "duplicate section id '{}'",
                    s.id
                )));
            }
            let width_ok = s.width.is_none_or(|w| w.is_finite() && w >= 0.0);
            if !(s.top.is_finite() && s.left.is_finite() && width_ok) {
                return Err(FxError::validation(format!(
                    "section '{}' has a non-finite edge",
                    s.id
                )));
            }
            if !(s.height.is_finite() && s.height >= 0.0) {
                return Err(FxError::validation(format!(
                    "section '{}' height must be finite and >= 0",
                    s.id
                )));
            }
        }
        Ok(())
    }

    /// Document height covered by sections.
    pub fn document_height(&self) -> f64 {
        self.sections
            .iter()
            .map(|s| s.top + s.height)
            .fold(0.0, f64::max)
    }

    /// Sections under `p`, topmost first.
    pub fn sections_at(&self, p: Point) -> Vec<&Section> {
        let mut hits: Vec<(usize, &Section)> = self
            .sections
            .iter()
            .enumerate()
            .filter(|(_, s)| s.contains(p))
            .collect();
        // Higher z first; among equal z, later in document order paints on top.
        hits.sort_by(|(ia, a), (ib, b)| b.z.cmp(&a.z).then(ib.cmp(ia)));
        hits.into_iter().map(|(_, s)| s).collect()
    }
}

impl BackgroundStack for Page {
    fn backgrounds_at(&self, point: Point) -> Vec<Rgba8> {
        let mut out: Vec<Rgba8> = self
            .sections_at(point)
            .into_iter()
            .map(|s| s.background)
            .collect();
        out.extend(self.background);
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/page/model.rs"]
mod tests;
