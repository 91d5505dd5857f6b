use crate::config::SimulationConfig;
use crate::error::Result;
use crate::logic::DecisionEngine;
use crate::models::{Plant, PlantInfo, TimeOfDay};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::{info, warn};

/// Source of greenhouse temperature readings.
pub trait SensorSource {
    fn temperature(&mut self) -> f64;
}

/// Uniform integer temperatures from a seedable generator.
pub struct RandomSensor {
    rng: StdRng,
    min: i32,
    max: i32,
}

impl RandomSensor {
    pub fn new(seed: Option<u64>, min: i32, max: i32) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng, min, max }
    }
}

impl SensorSource for RandomSensor {
    fn temperature(&mut self) -> f64 {
        self.rng.gen_range(self.min..=self.max) as f64
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PlantReport {
    pub name: String,
    pub plant_type: String,
    pub current_days: u32,
    pub growth_days: u32,
    pub humidity_before: f64,
    pub humidity_after_drying: f64,
    pub humidity_after: f64,
    pub action: Option<String>,
    pub amount: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct TickReport {
    pub tick: u32,
    pub day: u32,
    pub time_of_day: TimeOfDay,
    pub temperature: f64,
    pub plants: Vec<PlantReport>,
    /// Plants that finished growing at the end of this tick
    pub grown: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SimulationSummary {
    pub ticks: u32,
    pub days: u32,
    pub finished: bool,
    pub remaining: Vec<String>,
}

pub struct Greenhouse {
    engine: DecisionEngine,
    sensor: Box<dyn SensorSource>,
    plants: Vec<Plant>,
    day_count: u32,
    tick_count: u32,
    time_of_day: TimeOfDay,
}

impl Greenhouse {
    pub fn new(
        engine: DecisionEngine,
        sensor: Box<dyn SensorSource>,
        plant_names: &[String],
        config: &SimulationConfig,
    ) -> Result<Self> {
        let mut plants = Vec::with_capacity(plant_names.len());
        for name in plant_names {
            let info = match engine.repository().plant_info(name)? {
                Some(info) => {
                    info!(
                        plant = %info.name,
                        plant_type = %info.plant_type,
                        growth_days = info.growth_days,
                        "Plant found in catalog"
                    );
                    info
                }
                None => {
                    warn!(
                        plant = %name,
                        fallback = %config.fallback_plant_type,
                        "Plant not in catalog, using fallback category"
                    );
                    PlantInfo {
                        name: name.clone(),
                        plant_type: config.fallback_plant_type.clone(),
                        growth_days: config.default_growth_days,
                    }
                }
            };
            plants.push(Plant::new(info, config.initial_humidity));
        }

        Ok(Self {
            engine,
            sensor,
            plants,
            day_count: 0,
            tick_count: 0,
            time_of_day: TimeOfDay::Morning,
        })
    }

    pub fn plants(&self) -> &[Plant] {
        &self.plants
    }

    pub fn day(&self) -> u32 {
        self.day_count
    }

    pub fn time_of_day(&self) -> TimeOfDay {
        self.time_of_day
    }

    pub fn is_finished(&self) -> bool {
        self.plants.is_empty()
    }

    /// Run one phase of the day: read the sensor, dry out and water every
    /// plant, then move to the next phase.
    pub fn tick(&mut self) -> Result<TickReport> {
        let temperature = self.sensor.temperature();
        let decrease = self.engine.humidity_decrease(temperature);
        let phase = self.time_of_day;

        let mut reports = Vec::with_capacity(self.plants.len());
        for plant in &mut self.plants {
            let humidity_before = plant.humidity;
            plant.dry_out(decrease);
            let humidity_after_drying = plant.humidity;

            let decision =
                self.engine
                    .evaluate(&plant.plant_type, temperature, plant.humidity, phase)?;
            plant.water(decision.amount);

            reports.push(PlantReport {
                name: plant.name.clone(),
                plant_type: plant.plant_type.clone(),
                current_days: plant.current_days,
                growth_days: plant.growth_days,
                humidity_before,
                humidity_after_drying,
                humidity_after: plant.humidity,
                action: decision.action().map(str::to_string),
                amount: decision.amount,
            });
        }

        let report_day = self.day_count;
        let grown = self.advance_time();
        self.tick_count += 1;

        Ok(TickReport {
            tick: self.tick_count,
            day: report_day,
            time_of_day: phase,
            temperature,
            plants: reports,
            grown,
        })
    }

    /// Move to the next phase; entering Night completes a day.
    fn advance_time(&mut self) -> Vec<String> {
        self.time_of_day = self.time_of_day.next();
        if self.time_of_day != TimeOfDay::Night {
            return Vec::new();
        }

        self.day_count += 1;
        let mut grown = Vec::new();
        self.plants.retain_mut(|plant| {
            if plant.grow() {
                info!(plant = %plant.name, days = plant.current_days, "Plant fully grown");
                grown.push(plant.name.clone());
                false
            } else {
                true
            }
        });
        grown
    }

    /// Tick until every plant has grown or `max_ticks` is reached.
    pub fn run<F>(&mut self, max_ticks: u32, mut on_tick: F) -> Result<SimulationSummary>
    where
        F: FnMut(&TickReport),
    {
        let mut ticks = 0;
        while !self.is_finished() && ticks < max_ticks {
            let report = self.tick()?;
            on_tick(&report);
            ticks += 1;
        }

        if !self.is_finished() {
            warn!(max_ticks, remaining = self.plants.len(), "Simulation stopped at tick limit");
        }

        Ok(SimulationSummary {
            ticks,
            days: self.day_count,
            finished: self.is_finished(),
            remaining: self.plants.iter().map(|p| p.name.clone()).collect(),
        })
    }
}
