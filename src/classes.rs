use chrono::{DateTime, FixedOffset};
use log::{debug, info, warn};
use rocket::http::Status;
use rocket::response::status::Custom;
use rocket::serde::json::{self, Json};
use rocket::{Build, Rocket, State};
use serde::{Deserialize, Serialize};
use crate::error::ApiError;
use crate::store::{DeletedBody, Store};
use crate::table::{Record, RecordId};
use crate::util::{read_store, status_any_error, write_store};
use crate::validation::{check_date_order, check_name, require_date, violations_to_string, Violation};
use crate::SharedStore;

pub type ClassId = RecordId;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Class {
    pub id: ClassId,
    pub name: String,
    pub start_date: DateTime<FixedOffset>,
    pub end_date: DateTime<FixedOffset>,
    pub capacity: i64,
}
impl Record for Class {
    fn id(&self) -> RecordId {
        self.id
    }
}

/// Request body of class create and update.
#[derive(Deserialize, Default, Clone, Debug)]
pub struct ClassDraft {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub start_date: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub end_date: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub capacity: i64,
}

/// Mutable fields of a class that passed field validation.
#[derive(Clone, Debug)]
pub struct ClassFields {
    pub name: String,
    pub start_date: DateTime<FixedOffset>,
    pub end_date: DateTime<FixedOffset>,
    pub capacity: i64,
}
impl ClassFields {
    fn into_class(self, id: ClassId) -> Class {
        Class {
            id,
            name: self.name,
            start_date: self.start_date,
            end_date: self.end_date,
            capacity: self.capacity,
        }
    }
}

impl ClassDraft {
    pub fn validate(self) -> Result<ClassFields, Vec<Violation>> {
        let mut violations = vec![];
        check_name(&self.name, &mut violations);
        let start_date = require_date(self.start_date, Violation::StartDateRequired, &mut violations);
        let end_date = require_date(self.end_date, Violation::EndDateRequired, &mut violations);
        if self.capacity <= 0 {
            violations.push(Violation::CapacityRequired);
        }
        match (start_date, end_date) {
            (Some(start_date), Some(end_date)) if violations.is_empty() => Ok(ClassFields {
                name: self.name,
                start_date,
                end_date,
                capacity: self.capacity,
            }),
            _ => Err(violations),
        }
    }
}

fn invalid_class() -> ApiError {
    ApiError::ValidationFailed("Invalid Class".to_string())
}
fn class_not_found() -> ApiError {
    ApiError::NotFound("Class not found".to_string())
}
fn validate_draft(draft: ClassDraft) -> Result<ClassFields, ApiError> {
    draft.validate().map_err(|violations| {
        debug!("Class draft rejected: {}", violations_to_string(&violations));
        invalid_class()
    })
}

pub fn list_classes(store: &Store) -> Vec<Class> {
    store.classes.records().to_vec()
}
pub fn get_class(store: &Store, id: ClassId) -> Result<Class, ApiError> {
    store.classes.find(id)
        .map(|(_, class)| class.clone())
        .ok_or_else(class_not_found)
}
pub fn create_class(store: &mut Store, draft: ClassDraft) -> Result<Class, ApiError> {
    let fields = validate_draft(draft)?;
    check_date_order(&fields.start_date, &fields.end_date)?;
    let class = store.classes.create(|id| fields.into_class(id)).clone();
    info!("Class created, id: {}", class.id);
    Ok(class)
}
pub fn update_class(store: &mut Store, id: ClassId, draft: ClassDraft) -> Result<Class, ApiError> {
    let fields = validate_draft(draft)?;
    let Some((position, _)) = store.classes.find(id) else {
        warn!("Update of unknown class id: {id}");
        return Err(class_not_found());
    };
    check_date_order(&fields.start_date, &fields.end_date)?;
    let class = store.classes.replace(position, fields.into_class(id))
        .map_err(status_any_error)?
        .clone();
    info!("Class updated, id: {id}");
    Ok(class)
}
/// Bookings referencing the class are left untouched.
pub fn delete_class(store: &mut Store, id: ClassId) -> Result<DeletedBody, ApiError> {
    let Some((position, _)) = store.classes.find(id) else {
        warn!("Delete of unknown class id: {id}");
        return Err(class_not_found());
    };
    store.classes.delete(position).map_err(status_any_error)?;
    let dangling = store.bookings.records().iter().filter(|b| b.class_id == id).count();
    info!("Class deleted, id: {id}, bookings still referencing it: {dangling}");
    Ok(DeletedBody::new("Class deleted"))
}

fn decode_draft(draft: Result<Json<ClassDraft>, json::Error<'_>>) -> Result<ClassDraft, ApiError> {
    draft.map(Json::into_inner).map_err(|e| {
        debug!("Class body decode error: {e}");
        ApiError::MalformedInput("Invalid Class".to_string())
    })
}

#[get("/api/classes")]
fn get_classes(store: &State<SharedStore>) -> Result<Json<Vec<Class>>, ApiError> {
    let store = read_store(store)?;
    Ok(Json(list_classes(&store)))
}
#[get("/api/classes/<id>")]
fn get_class_by_id(id: Result<ClassId, &str>, store: &State<SharedStore>) -> Result<Json<Class>, ApiError> {
    let id = id.map_err(|_| ApiError::invalid_id())?;
    let store = read_store(store)?;
    get_class(&store, id).map(Json)
}
#[post("/api/classes", data = "<draft>")]
fn post_class(draft: Result<Json<ClassDraft>, json::Error<'_>>, store: &State<SharedStore>) -> Result<Custom<Json<Class>>, ApiError> {
    let draft = decode_draft(draft)?;
    let mut store = write_store(store)?;
    let class = create_class(&mut store, draft)?;
    Ok(Custom(Status::Created, Json(class)))
}
#[put("/api/classes/<id>", data = "<draft>")]
fn put_class(id: Result<ClassId, &str>, draft: Result<Json<ClassDraft>, json::Error<'_>>, store: &State<SharedStore>) -> Result<Json<Class>, ApiError> {
    let id = id.map_err(|_| ApiError::invalid_id())?;
    let draft = decode_draft(draft)?;
    let mut store = write_store(store)?;
    update_class(&mut store, id, draft).map(Json)
}
#[delete("/api/classes/<id>")]
fn delete_class_by_id(id: Result<ClassId, &str>, store: &State<SharedStore>) -> Result<Json<DeletedBody>, ApiError> {
    let id = id.map_err(|_| ApiError::invalid_id())?;
    let mut store = write_store(store)?;
    delete_class(&mut store, id).map(Json)
}

pub fn extend(rocket: Rocket<Build>) -> Rocket<Build> {
    rocket.mount("/", routes![
        get_classes,
        get_class_by_id,
        post_class,
        put_class,
        delete_class_by_id,
    ])
}
