use chrono::{DateTime, FixedOffset};
use log::{debug, info, warn};
use rocket::http::Status;
use rocket::response::status::Custom;
use rocket::serde::json::{self, Json};
use rocket::{Build, Rocket, State};
use serde::{Deserialize, Serialize};
use crate::classes::ClassId;
use crate::error::ApiError;
use crate::store::{DeletedBody, Store};
use crate::table::{Record, RecordId};
use crate::util::{read_store, status_any_error, write_store};
use crate::validation::{check_class_window, check_name, require_date, violations_to_string, Violation};
use crate::SharedStore;

pub type BookingId = RecordId;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Booking {
    pub id: BookingId,
    pub name: String,
    pub class_id: ClassId,
    pub date: DateTime<FixedOffset>,
}
impl Record for Booking {
    fn id(&self) -> RecordId {
        self.id
    }
}

#[derive(Deserialize, Default, Clone, Debug)]
pub struct BookingDraft {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub class_id: ClassId,
    #[serde(default)]
    pub date: Option<DateTime<FixedOffset>>,
}

#[derive(Clone, Debug)]
pub struct BookingFields {
    pub name: String,
    pub class_id: ClassId,
    pub date: DateTime<FixedOffset>,
}
impl BookingFields {
    fn into_booking(self, id: BookingId) -> Booking {
        Booking {
            id,
            name: self.name,
            class_id: self.class_id,
            date: self.date,
        }
    }
}

impl BookingDraft {
    pub fn validate(self) -> Result<BookingFields, Vec<Violation>> {
        let mut violations = vec![];
        check_name(&self.name, &mut violations);
        if self.class_id == 0 {
            violations.push(Violation::ClassRequired);
        }
        let date = require_date(self.date, Violation::DateRequired, &mut violations);
        match date {
            Some(date) if violations.is_empty() => Ok(BookingFields {
                name: self.name,
                class_id: self.class_id,
                date,
            }),
            _ => Err(violations),
        }
    }
}

fn invalid_booking() -> ApiError {
    ApiError::ValidationFailed("Invalid Booking".to_string())
}
fn booking_not_found() -> ApiError {
    ApiError::NotFound("Booking not found".to_string())
}
fn validate_draft(draft: BookingDraft) -> Result<BookingFields, ApiError> {
    draft.validate().map_err(|violations| {
        debug!("Booking draft rejected: {}", violations_to_string(&violations));
        invalid_booking()
    })
}
/// Referenced class must exist, then the date must fall in its window.
fn check_references(store: &Store, fields: &BookingFields) -> Result<(), ApiError> {
    let Some((_, class)) = store.classes.find(fields.class_id) else {
        warn!("Booking references unknown class id: {}", fields.class_id);
        return Err(ApiError::NotFound("Class not found".to_string()));
    };
    check_class_window(class, &fields.date)
}

pub fn list_bookings(store: &Store) -> Vec<Booking> {
    store.bookings.records().to_vec()
}
pub fn get_booking(store: &Store, id: BookingId) -> Result<Booking, ApiError> {
    store.bookings.find(id)
        .map(|(_, booking)| booking.clone())
        .ok_or_else(booking_not_found)
}
pub fn create_booking(store: &mut Store, draft: BookingDraft) -> Result<Booking, ApiError> {
    let fields = validate_draft(draft)?;
    check_references(store, &fields)?;
    let booking = store.bookings.create(|id| fields.into_booking(id)).clone();
    info!("Booking created, id: {}, class id: {}", booking.id, booking.class_id);
    Ok(booking)
}
pub fn update_booking(store: &mut Store, id: BookingId, draft: BookingDraft) -> Result<Booking, ApiError> {
    let fields = validate_draft(draft)?;
    let Some((position, _)) = store.bookings.find(id) else {
        warn!("Update of unknown booking id: {id}");
        return Err(booking_not_found());
    };
    check_references(store, &fields)?;
    let booking = store.bookings.replace(position, fields.into_booking(id))
        .map_err(status_any_error)?
        .clone();
    info!("Booking updated, id: {id}");
    Ok(booking)
}
pub fn delete_booking(store: &mut Store, id: BookingId) -> Result<DeletedBody, ApiError> {
    let Some((position, _)) = store.bookings.find(id) else {
        warn!("Delete of unknown booking id: {id}");
        return Err(booking_not_found());
    };
    store.bookings.delete(position).map_err(status_any_error)?;
    info!("Booking deleted, id: {id}");
    Ok(DeletedBody::new("Booking deleted"))
}

fn decode_draft(draft: Result<Json<BookingDraft>, json::Error<'_>>) -> Result<BookingDraft, ApiError> {
    draft.map(Json::into_inner).map_err(|e| {
        debug!("Booking body decode error: {e}");
        ApiError::MalformedInput("Invalid Booking".to_string())
    })
}

#[get("/api/bookings")]
fn get_bookings(store: &State<SharedStore>) -> Result<Json<Vec<Booking>>, ApiError> {
    let store = read_store(store)?;
    Ok(Json(list_bookings(&store)))
}
#[get("/api/bookings/<id>")]
fn get_booking_by_id(id: Result<BookingId, &str>, store: &State<SharedStore>) -> Result<Json<Booking>, ApiError> {
    let id = id.map_err(|_| ApiError::invalid_id())?;
    let store = read_store(store)?;
    get_booking(&store, id).map(Json)
}
#[post("/api/bookings", data = "<draft>")]
fn post_booking(draft: Result<Json<BookingDraft>, json::Error<'_>>, store: &State<SharedStore>) -> Result<Custom<Json<Booking>>, ApiError> {
    let draft = decode_draft(draft)?;
    let mut store = write_store(store)?;
    let booking = create_booking(&mut store, draft)?;
    Ok(Custom(Status::Created, Json(booking)))
}
#[put("/api/bookings/<id>", data = "<draft>")]
fn put_booking(id: Result<BookingId, &str>, draft: Result<Json<BookingDraft>, json::Error<'_>>, store: &State<SharedStore>) -> Result<Json<Booking>, ApiError> {
    let id = id.map_err(|_| ApiError::invalid_id())?;
    let draft = decode_draft(draft)?;
    let mut store = write_store(store)?;
    update_booking(&mut store, id, draft).map(Json)
}
#[delete("/api/bookings/<id>")]
fn delete_booking_by_id(id: Result<BookingId, &str>, store: &State<SharedStore>) -> Result<Json<DeletedBody>, ApiError> {
    let id = id.map_err(|_| ApiError::invalid_id())?;
    let mut store = write_store(store)?;
    delete_booking(&mut store, id).map(Json)
}

pub fn extend(rocket: Rocket<Build>) -> Rocket<Build> {
    rocket.mount("/", routes![
        get_bookings,
        get_booking_by_id,
        post_booking,
        put_booking,
        delete_booking_by_id,
    ])
}
