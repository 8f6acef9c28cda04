use diesel::prelude::*;
use crate::schema::pilot_institutions;
use crate::schema::waitlist_students;

#[derive(Queryable, Selectable)]
#[diesel(table_name = waitlist_students)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct WaitlistSignup {
    pub id: i32,
    pub name: String,
    pub email: String, // unique, one row per email
    pub school: String,
    pub frustration: Option<String>, // free-form answer, optional in the form
    pub locale: String, // en, ru or kk
    pub created_at: i32, // int timestamp utc epoch
}

#[derive(Insertable)]
#[diesel(table_name = waitlist_students)]
pub struct NewWaitlistSignup {
    pub name: String,
    pub email: String,
    pub school: String,
    pub frustration: Option<String>,
    pub locale: String,
    pub created_at: i32,
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = pilot_institutions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PilotApplication {
    pub id: i32,
    pub name: String,
    pub role: String, // contact person's role at the institution, e.g. Dean
    pub institution: String,
    pub email: String, // unique, one row per email
    pub challenge: Option<String>, // free-form answer, optional in the form
    pub locale: String,
    pub created_at: i32,
}

#[derive(Insertable)]
#[diesel(table_name = pilot_institutions)]
pub struct NewPilotApplication {
    pub name: String,
    pub role: String,
    pub institution: String,
    pub email: String,
    pub challenge: Option<String>,
    pub locale: String,
    pub created_at: i32,
}
