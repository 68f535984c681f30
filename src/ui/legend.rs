use crate::{
    rendering::style::StyleConfig,
    ui::{controls::ControlPosition, popup::escape_html},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub color: String,
    pub label: String,
}

/// Box listing what each marker color means
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendControl {
    pub title: String,
    pub position: ControlPosition,
    pub entries: Vec<LegendEntry>,
}

impl LegendControl {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            position: ControlPosition::BottomRight,
            entries: Vec::new(),
        }
    }

    /// Legend for the default and highlight shop styles
    pub fn from_styles(title: impl Into<String>, styles: &StyleConfig) -> Self {
        Self::new(title)
            .with_entry(styles.default.fill_color.clone(), "Shop Marker")
            .with_entry(styles.highlight.fill_color.clone(), "Highlighted Shop")
    }

    pub fn with_entry(mut self, color: impl Into<String>, label: impl Into<String>) -> Self {
        self.entries.push(LegendEntry {
            color: color.into(),
            label: label.into(),
        });
        self
    }

    pub fn to_html(&self) -> String {
        let mut html = format!("<h4>{}</h4>", escape_html(&self.title));
        for entry in &self.entries {
            html.push_str(&format!(
                "<i style=\"background: {}\"></i> {}<br>",
                escape_html(&entry.color),
                escape_html(&entry.label)
            ));
        }
        html
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legend_from_default_styles() {
        let legend = LegendControl::from_styles("Legend", &StyleConfig::default());
        assert_eq!(
            legend.to_html(),
            "<h4>Legend</h4>\
             <i style=\"background: #ff7800\"></i> Shop Marker<br>\
             <i style=\"background: #ffff00\"></i> Highlighted Shop<br>"
        );
        assert_eq!(legend.position, ControlPosition::BottomRight);
    }

    #[test]
    fn test_empty_legend_has_only_title() {
        assert_eq!(LegendControl::new("Shops & Cafés").to_html(), "<h4>Shops &amp; Cafés</h4>");
    }
}
