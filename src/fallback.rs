//! Built-in default data served when the database has nothing to offer.
//!
//! The dashboard must always render something, so the API keeps a static set
//! of ward summaries and a default weather record. These live in an explicit
//! provider constructed at startup and threaded through `AppState` rather
//! than in module-level mutable state.

use chrono::NaiveDate;
use rand::Rng;

use crate::{
    api::types::{CoordinatesDto, ForecastDto, PollutantsDto, SourcesDto, WardDto, WeatherDto},
    trend::AqiSample,
};

/// Static defaults injected into the API at startup.
#[derive(Debug, Clone)]
pub struct FallbackData {
    pub wards: Vec<WardDto>,
    pub weather: WeatherDto,
}

/// AQI assumed for mock history when a ward has no stored reading at all.
pub const DEFAULT_CURRENT_AQI: f64 = 150.0;

impl Default for FallbackData {
    fn default() -> Self {
        Self {
            wards: seed_wards().iter().map(|w| w.to_ward_dto()).collect(),
            weather: WeatherDto {
                wind_speed: 8.5,
                temperature: 28.0,
                humidity: 65.0,
            },
        }
    }
}

/// Synthesize a `days`-long daily series ending today, anchored at
/// `current_aqi` with a mild improving drift plus noise. Used when a ward has
/// fewer than seven stored readings, so the predictor still has a full window.
pub fn mock_history(current_aqi: f64, days: u32, today: NaiveDate) -> Vec<AqiSample> {
    let mut rng = rand::thread_rng();
    let days = days.max(1);
    (0..days)
        .map(|i| {
            let date = today - chrono::Duration::days((days - i - 1) as i64);
            let drift = (i as f64 / days as f64) * 15.0;
            let noise: f64 = rng.gen_range(-10.0..10.0);
            let aqi = (current_aqi - drift + noise).round().max(0.0);
            AqiSample { date, aqi }
        })
        .collect()
}

/// One ward's worth of seed data, shared by the seeder and the fallback set.
#[derive(Debug, Clone)]
pub struct SeedWard {
    pub id: &'static str,
    pub name: &'static str,
    pub coordinates_path: &'static str,
    pub center_x: f64,
    pub center_y: f64,
    pub aqi: i64,
    pub category: &'static str,
    pub pollutants: [f64; 5],
    pub sources: [f64; 4],
    pub forecast: [i64; 2],
    pub alerts: &'static [&'static str],
    pub priority: i64,
}

impl SeedWard {
    pub fn to_ward_dto(&self) -> WardDto {
        WardDto {
            id: self.id.to_string(),
            name: self.name.to_string(),
            aqi: self.aqi,
            category: self.category.to_string(),
            pollutants: PollutantsDto {
                pm25: self.pollutants[0],
                pm10: self.pollutants[1],
                no2: self.pollutants[2],
                so2: self.pollutants[3],
                co: self.pollutants[4],
            },
            sources: SourcesDto {
                vehicular: self.sources[0],
                construction: self.sources[1],
                industrial: self.sources[2],
                waste_burning: self.sources[3],
            },
            forecast: ForecastDto {
                hours24: self.forecast[0],
                hours48: self.forecast[1],
            },
            coordinates: CoordinatesDto {
                path: self.coordinates_path.to_string(),
                center_x: self.center_x,
                center_y: self.center_y,
            },
            alerts: self.alerts.iter().map(|a| a.to_string()).collect(),
            priority: self.priority,
        }
    }
}

/// The eight Delhi wards the original monitoring pilot covered.
pub fn seed_wards() -> &'static [SeedWard] {
    static WARDS: &[SeedWard] = &[
        SeedWard {
            id: "W001",
            name: "New Delhi - Lutyens Zone",
            coordinates_path: "M 200 70 L 320 65 L 350 95 L 360 130 L 355 170 L 340 200 L 310 215 L 280 210 L 250 195 L 220 170 L 200 140 L 200 70 Z",
            center_x: 280.0,
            center_y: 140.0,
            aqi: 342,
            category: "Severe",
            pollutants: [285.0, 420.0, 95.0, 45.0, 8.2],
            sources: [45.0, 25.0, 20.0, 10.0],
            forecast: [365, 380],
            alerts: &["High vehicular traffic", "Construction activity detected"],
            priority: 1,
        },
        SeedWard {
            id: "W002",
            name: "Central Delhi - Old Delhi",
            coordinates_path: "M 130 110 L 200 105 L 220 140 L 230 180 L 225 220 L 210 250 L 185 265 L 155 260 L 130 240 L 115 200 L 120 150 L 130 110 Z",
            center_x: 175.0,
            center_y: 185.0,
            aqi: 298,
            category: "Very Poor",
            pollutants: [245.0, 380.0, 110.0, 85.0, 7.5],
            sources: [30.0, 15.0, 45.0, 10.0],
            forecast: [310, 325],
            alerts: &["Industrial emissions spike", "Dense traffic in Chandni Chowk"],
            priority: 2,
        },
        SeedWard {
            id: "W003",
            name: "North Delhi",
            coordinates_path: "M 90 60 L 200 55 L 220 85 L 230 120 L 225 160 L 210 190 L 180 205 L 150 200 L 120 180 L 100 150 L 90 110 L 90 60 Z",
            center_x: 160.0,
            center_y: 130.0,
            aqi: 185,
            category: "Moderate",
            pollutants: [125.0, 195.0, 55.0, 25.0, 4.2],
            sources: [50.0, 20.0, 15.0, 15.0],
            forecast: [195, 210],
            alerts: &[],
            priority: 5,
        },
        SeedWard {
            id: "W004",
            name: "East Delhi",
            coordinates_path: "M 180 210 L 260 205 L 280 240 L 290 280 L 285 320 L 270 350 L 240 365 L 210 360 L 180 340 L 165 300 L 170 250 L 180 210 Z",
            center_x: 235.0,
            center_y: 285.0,
            aqi: 265,
            category: "Poor",
            pollutants: [195.0, 310.0, 75.0, 35.0, 6.1],
            sources: [55.0, 30.0, 10.0, 5.0],
            forecast: [280, 290],
            alerts: &["Traffic congestion expected", "High population density"],
            priority: 3,
        },
        SeedWard {
            id: "W005",
            name: "South Delhi",
            coordinates_path: "M 360 210 L 460 205 L 490 240 L 500 290 L 495 340 L 480 370 L 450 385 L 410 380 L 370 360 L 350 320 L 355 260 L 360 210 Z",
            center_x: 425.0,
            center_y: 295.0,
            aqi: 142,
            category: "Moderate",
            pollutants: [95.0, 155.0, 45.0, 20.0, 3.5],
            sources: [40.0, 25.0, 20.0, 15.0],
            forecast: [155, 165],
            alerts: &[],
            priority: 6,
        },
        SeedWard {
            id: "W006",
            name: "West Delhi",
            coordinates_path: "M 320 110 L 420 105 L 440 140 L 450 180 L 445 220 L 430 250 L 400 265 L 370 260 L 340 240 L 320 200 L 315 150 L 320 110 Z",
            center_x: 380.0,
            center_y: 185.0,
            aqi: 95,
            category: "Satisfactory",
            pollutants: [65.0, 105.0, 30.0, 15.0, 2.1],
            sources: [35.0, 20.0, 25.0, 20.0],
            forecast: [105, 115],
            alerts: &[],
            priority: 8,
        },
        SeedWard {
            id: "W007",
            name: "North East Delhi",
            coordinates_path: "M 260 260 L 340 255 L 360 290 L 370 330 L 365 370 L 350 390 L 320 395 L 290 390 L 260 370 L 245 330 L 250 280 L 260 260 Z",
            center_x: 315.0,
            center_y: 325.0,
            aqi: 312,
            category: "Severe",
            pollutants: [265.0, 395.0, 105.0, 50.0, 8.8],
            sources: [60.0, 20.0, 15.0, 5.0],
            forecast: [335, 350],
            alerts: &["Heavy traffic flow", "Road dust accumulation", "Industrial area"],
            priority: 2,
        },
        SeedWard {
            id: "W008",
            name: "South West Delhi",
            coordinates_path: "M 460 160 L 540 155 L 560 190 L 570 240 L 565 290 L 550 320 L 520 335 L 490 330 L 460 310 L 445 270 L 450 210 L 460 160 Z",
            center_x: 510.0,
            center_y: 245.0,
            aqi: 225,
            category: "Poor",
            pollutants: [165.0, 265.0, 65.0, 30.0, 5.5],
            sources: [45.0, 30.0, 15.0, 10.0],
            forecast: [240, 250],
            alerts: &["Construction activity", "Metro expansion work"],
            priority: 4,
        },
    ];
    WARDS
}
