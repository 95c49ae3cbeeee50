//! Presentation sinks.
//!
//! A sink owns a fixed set of display regions: today's min and max, the
//! station name, and an append-only list of departure rows. Sinks never fail;
//! whatever was written before a pipeline error stays visible.

use askama::Template;

use crate::model::NormalizedDeparture;

pub trait PresentationSink {
    fn render_weather(&mut self, min_c: f64, max_c: f64);

    fn render_station_name(&mut self, name: &str);

    /// Appends one row; earlier rows are kept.
    fn render_train_row(&mut self, departure: &NormalizedDeparture);
}

fn celsius(value: f64) -> String {
    format!("{value}°C")
}

/// Plain-text terminal output.
#[derive(Debug, Default, Clone)]
pub struct TextSink {
    out: String,
}

impl TextSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.out
    }
}

impl PresentationSink for TextSink {
    fn render_weather(&mut self, min_c: f64, max_c: f64) {
        self.out.push_str(&format!("Today  min {}  max {}\n", celsius(min_c), celsius(max_c)));
    }

    fn render_station_name(&mut self, name: &str) {
        self.out.push_str(&format!("\nDepartures from {name}\n"));
    }

    fn render_train_row(&mut self, departure: &NormalizedDeparture) {
        self.out.push_str(&format!(
            "  {}  {:<5} {}\n",
            departure.departure_time, departure.category, departure.destination
        ));
    }
}

/// Drops everything; for callers that only want the returned [`crate::Dashboard`].
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl PresentationSink for NullSink {
    fn render_weather(&mut self, _min_c: f64, _max_c: f64) {}

    fn render_station_name(&mut self, _name: &str) {}

    fn render_train_row(&mut self, _departure: &NormalizedDeparture) {}
}

#[derive(Template)]
#[template(path = "dashboard.html")]
struct DashboardFragment<'a> {
    min: &'a str,
    max: &'a str,
    station: &'a str,
    departures: &'a [NormalizedDeparture],
}

/// HTML fragment using the widget's markup (`.min`, `.max`,
/// `.departures header p`, one `<article>` per departure).
#[derive(Debug, Default, Clone)]
pub struct HtmlSink {
    min: String,
    max: String,
    station: String,
    departures: Vec<NormalizedDeparture>,
}

impl HtmlSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(&self) -> Result<String, askama::Error> {
        DashboardFragment {
            min: &self.min,
            max: &self.max,
            station: &self.station,
            departures: &self.departures,
        }
        .render()
    }
}

impl PresentationSink for HtmlSink {
    fn render_weather(&mut self, min_c: f64, max_c: f64) {
        self.min = celsius(min_c);
        self.max = celsius(max_c);
    }

    fn render_station_name(&mut self, name: &str) {
        self.station = name.to_string();
    }

    fn render_train_row(&mut self, departure: &NormalizedDeparture) {
        self.departures.push(departure.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn departure(time: &str, category: &str, destination: &str) -> NormalizedDeparture {
        NormalizedDeparture {
            departure_time: time.to_string(),
            destination: destination.to_string(),
            category: category.to_string(),
        }
    }

    fn fill(sink: &mut dyn PresentationSink) {
        sink.render_weather(-0.5, 7.0);
        sink.render_station_name("Lausanne");
        sink.render_train_row(&departure("08:05", "IR", "Genève"));
        sink.render_train_row(&departure("08:12", "S", "Palézieux"));
    }

    #[test]
    fn celsius_matches_plain_number_display() {
        assert_eq!(celsius(7.0), "7°C");
        assert_eq!(celsius(-0.5), "-0.5°C");
    }

    #[test]
    fn text_sink_appends_rows_in_order() {
        let mut sink = TextSink::new();
        fill(&mut sink);

        assert_eq!(
            sink.as_str(),
            "Today  min -0.5°C  max 7°C\n\
             \n\
             Departures from Lausanne\n  \
             08:05  IR    Genève\n  \
             08:12  S     Palézieux\n"
        );
    }

    #[test]
    fn html_sink_fills_widget_regions() {
        let mut sink = HtmlSink::new();
        fill(&mut sink);

        let html = sink.render().unwrap();
        assert!(html.contains(r#"<p class="min">-0.5°C</p>"#));
        assert!(html.contains(r#"<p class="max">7°C</p>"#));
        assert!(html.contains("<header><p>Lausanne</p></header>"));
        assert!(html.contains(r#"<div class="category" data-category="IR">IR</div>"#));
        assert_eq!(html.matches("<article>").count(), 2);

        let first = html.find("Genève").unwrap();
        let second = html.find("Palézieux").unwrap();
        assert!(first < second);
    }

    #[test]
    fn html_sink_escapes_api_text() {
        let mut sink = HtmlSink::new();
        sink.render_station_name("A & B");
        sink.render_train_row(&departure("09:00", "IC", "<script>"));

        let html = sink.render().unwrap();
        assert!(html.contains("A &amp; B"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn partial_output_survives() {
        let mut sink = TextSink::new();
        sink.render_weather(1.0, 2.0);
        assert_eq!(sink.as_str(), "Today  min 1°C  max 2°C\n");
    }
}
