#[macro_use] extern crate rocket;

use std::sync::RwLock;
use log::info;
use rocket::{Build, Rocket};
use serde::Deserialize;
use crate::store::Store;

mod bookings;
mod classes;
mod error;
mod store;
mod table;
mod util;
mod validation;

#[derive(Deserialize, Debug)]
#[serde(default)]
struct AppConfig {
    seed_sample_data: bool,
}
impl Default for AppConfig {
    fn default() -> Self {
        Self { seed_sample_data: true }
    }
}

type SharedStore = RwLock<Store>;

fn build_rocket(rocket: Rocket<Build>) -> Rocket<Build> {
    let cfg = rocket.figment().extract::<AppConfig>().unwrap_or_default();
    let store = if cfg.seed_sample_data {
        Store::with_sample_data()
    } else {
        Store::default()
    };
    info!("Store ready, classes: {}, bookings: {}", store.classes.records().len(), store.bookings.records().len());

    let rocket = error::extend(rocket);
    let rocket = classes::extend(rocket);
    let rocket = bookings::extend(rocket);

    rocket.manage(SharedStore::new(store))
}

#[launch]
fn rocket() -> _ {
    build_rocket(rocket::build())
}
