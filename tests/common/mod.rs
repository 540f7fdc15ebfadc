// Shared synthetic fixture
//
// 22 crop labels with four samples each, plus a handful of districts. Every
// label occupies its own band of attribute space so the forest separates them
// cleanly.

#![allow(dead_code)]

use crop_advisor::{CropAdvisor, DatasetStore, ForestParams};
use polars::prelude::*;

pub const LABELS: [&str; 22] = [
    "apple",
    "banana",
    "blackgram",
    "chickpea",
    "coconut",
    "coffee",
    "cotton",
    "grapes",
    "jute",
    "kidneybeans",
    "lentil",
    "maize",
    "mango",
    "mothbeans",
    "mungbean",
    "muskmelon",
    "orange",
    "papaya",
    "pigeonpeas",
    "pomegranate",
    "rice",
    "watermelon",
];

pub const SAMPLES_PER_LABEL: usize = 4;

pub fn crop_frame() -> DataFrame {
    let mut n = Vec::new();
    let mut p = Vec::new();
    let mut k = Vec::new();
    let mut temperature = Vec::new();
    let mut humidity = Vec::new();
    let mut ph = Vec::new();
    let mut rainfall = Vec::new();
    let mut label = Vec::new();

    for (i, name) in LABELS.iter().enumerate() {
        let i = i as f64;
        for j in 0..SAMPLES_PER_LABEL {
            let j = j as f64;
            n.push(5.0 + 6.0 * i + j);
            p.push(10.0 + 5.0 * i + j);
            k.push(8.0 + 7.0 * i + j);
            temperature.push(15.0 + 0.8 * i + 0.1 * j);
            humidity.push(30.0 + 3.0 * i + 0.5 * j);
            ph.push(4.5 + 0.15 * i + 0.02 * j);
            rainfall.push(40.0 + 12.0 * i + 3.0 * j);
            label.push(*name);
        }
    }

    df![
        "N" => n,
        "P" => p,
        "K" => k,
        "temperature" => temperature,
        "humidity" => humidity,
        "ph" => ph,
        "rainfall" => rainfall,
        "label" => label,
    ]
    .unwrap()
}

pub fn rainfall_frame() -> DataFrame {
    df![
        "STATE_UT_NAME" => &[
            "MAHARASHTRA",
            "MAHARASHTRA",
            "KERALA",
            "PUNJAB",
            "RAJASTHAN",
            "MAHARASHTRA",
        ],
        "DISTRICT" => &["PUNE", "NASHIK", "KOLLAM", "LUDHIANA", "JAISALMER", "PUNE"],
        "ANNUAL" => &[722.6, 1010.4, 2600.1, 680.0, 181.2, 900.0],
        "Jan-Feb" => &[3.1, 2.4, 30.2, 45.0, 4.0, 5.0],
        "Mar-May" => &[60.0, 40.2, 400.5, 30.0, 12.0, 70.0],
        "Jun-Sep" => &[560.3, 850.1, 1700.0, 520.0, 150.0, 700.0],
        "Oct-Dec" => &[99.2, 117.7, 469.4, 20.0, 15.2, 125.0],
    ]
    .unwrap()
}

pub fn store() -> DatasetStore {
    DatasetStore::from_frames(&crop_frame(), &rainfall_frame()).unwrap()
}

/// Small forest keeps the tests fast
pub fn test_params() -> ForestParams {
    ForestParams {
        n_trees: 25,
        ..ForestParams::default()
    }
}

pub fn advisor() -> CropAdvisor {
    CropAdvisor::from_store(store(), &test_params(), 5).unwrap()
}
