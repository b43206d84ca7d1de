use crate::bands::{GreeneryBand, TemperatureBand};
use crate::model::observation::Observation;
use serde::Serialize;

const AQI_BORDER: &str = "#c76f2b";
const AQI_FILL: &str = "rgba(199,111,43,0.12)";
const AQI_TENSION: f64 = 0.3;

/// Bar dataset with one color per bar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarChart {
    pub label: &'static str,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub colors: Vec<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineChart {
    pub label: &'static str,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub border_color: &'static str,
    pub fill_color: &'static str,
    pub tension: f64,
    pub fill: bool,
}

/// The three dashboard charts, all labelled by area in display order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSet {
    pub temperature: BarChart,
    pub aqi: LineChart,
    pub greenery: BarChart,
}

impl ChartSet {
    pub fn from_observations(observations: &[Observation]) -> Self {
        let labels: Vec<String> = observations.iter().map(|item| item.area.clone()).collect();
        let temps: Vec<f64> = observations.iter().map(|item| item.temp).collect();
        let greens: Vec<f64> = observations.iter().map(|item| item.green).collect();

        Self {
            temperature: BarChart {
                label: "Temperature (°C)",
                labels: labels.clone(),
                colors: temps
                    .iter()
                    .map(|&t| TemperatureBand::classify(t).color())
                    .collect(),
                values: temps,
            },
            aqi: LineChart {
                label: "AQI",
                labels: labels.clone(),
                values: observations.iter().map(|item| item.aqi).collect(),
                border_color: AQI_BORDER,
                fill_color: AQI_FILL,
                tension: AQI_TENSION,
                fill: true,
            },
            greenery: BarChart {
                label: "Greenery %",
                labels,
                colors: greens
                    .iter()
                    .map(|&g| GreeneryBand::classify(g).color())
                    .collect(),
                values: greens,
            },
        }
    }
}
