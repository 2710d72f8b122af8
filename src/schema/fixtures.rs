//! Upstream payloads shared by the schema and route tests.

use serde_json::{json, Value};

/// Current weather for Nanyuki, KE, with the explicit nulls the provider sends
pub fn current_weather_json() -> Value {
    json!({
        "coord": { "lat": 0.142, "lon": 37.01 },
        "weather": [
            { "id": 802, "main": "Clouds", "description": "scattered clouds", "icon": "03d" }
        ],
        "base": "stations",
        "main": {
            "temp": 298.27,
            "feels_like": 297.93,
            "temp_min": 298.27,
            "temp_max": 298.27,
            "pressure": 1014,
            "humidity": 42,
            "sea_level": 1014,
            "grnd_level": 831
        },
        "visibility": 10000,
        "wind": { "speed": 4.38, "deg": 30, "gust": 4.5 },
        "rain": null,
        "clouds": { "all": 31 },
        "dt": 1747040921,
        "sys": {
            "type": null,
            "id": null,
            "country": "KE",
            "sunrise": 1747020281,
            "sunset": 1747063923
        },
        "timezone": 10800,
        "id": 184433,
        "name": "Nanyuki",
        "cod": 200
    })
}

fn daily_entry(day: usize) -> Value {
    let offset = day as i64 * 86400;
    json!({
        "dt": 1661857200 + offset,
        "sunrise": 1661834187 + offset,
        "sunset": 1661882248 + offset,
        "temp": {
            "day": 299.66 - day as f64 * 0.75,
            "min": 288.93,
            "max": 299.66,
            "night": 290.31,
            "eve": 297.16,
            "morn": 288.93
        },
        "feels_like": { "day": 299.66, "night": 290.3, "eve": 297.1, "morn": 288.73 },
        "pressure": 1017,
        "humidity": 44,
        "weather": [
            { "id": 500, "main": "Rain", "description": "light rain", "icon": "10d" }
        ],
        "speed": 2.7,
        "deg": 209,
        "gust": 3.58,
        "clouds": 53,
        "pop": 0.7,
        "rain": 2.51
    })
}

/// Daily forecast for Zocca, IT with `days` entries
pub fn daily_forecast_json(days: usize) -> Value {
    let list: Vec<Value> = (0..days).map(daily_entry).collect();

    json!({
        "city": {
            "id": 3163858,
            "name": "Zocca",
            "coord": { "lon": 10.99, "lat": 44.34 },
            "country": "IT",
            "population": 4593,
            "timezone": 7200
        },
        "cod": "200",
        "message": 0.0582563,
        "cnt": days,
        "list": list
    })
}

/// 3-hour step forecast for Zocca, IT; only the first step carries rain
pub fn period_forecast_json(steps: usize) -> Value {
    let list: Vec<Value> = (0..steps)
        .map(|step| {
            let mut entry = json!({
                "dt": 1661871600 + step as i64 * 10800,
                "main": {
                    "temp": 296.76,
                    "feels_like": 296.98,
                    "temp_min": 296.76,
                    "temp_max": 297.87,
                    "pressure": 1015,
                    "sea_level": 1015,
                    "grnd_level": 933,
                    "humidity": 69,
                    "temp_kf": -1.11
                },
                "weather": [
                    { "id": 500, "main": "Rain", "description": "light rain", "icon": "10d" }
                ],
                "clouds": { "all": 100 },
                "wind": { "speed": 0.62, "deg": 349, "gust": 1.18 },
                "visibility": 10000,
                "pop": 0.32,
                "sys": { "pod": "d" },
                "dt_txt": format!("2022-08-30 {:02}:00:00", 15 + step * 3)
            });
            if step == 0 {
                entry["rain"] = json!({ "3h": 0.26 });
            }
            entry
        })
        .collect();

    json!({
        "cod": "200",
        "message": 0,
        "cnt": steps,
        "list": list,
        "city": {
            "id": 3163858,
            "name": "Zocca",
            "coord": { "lat": 44.34, "lon": 10.99 },
            "country": "IT",
            "population": 4593,
            "timezone": 7200,
            "sunrise": 1661834187,
            "sunset": 1661882248
        }
    })
}
