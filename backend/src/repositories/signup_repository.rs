use diesel::prelude::*;
use diesel::r2d2::PoolError;
use diesel::result::DatabaseErrorKind;
use diesel::result::Error as DieselError;
use crate::{
    models::signup_models::{NewPilotApplication, NewWaitlistSignup},
    schema::{pilot_institutions, waitlist_students},
    DbPool,
};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("connection pool error: {0}")]
    Pool(#[from] PoolError),
    #[error("database error: {0}")]
    Database(#[from] DieselError),
}

impl StoreError {
    /// True when the insert hit the unique index on `email`. This is the
    /// only store failure callers distinguish; everything else is opaque.
    pub fn is_unique_violation(&self) -> bool {
        matches!(
            self,
            StoreError::Database(DieselError::DatabaseError(
                DatabaseErrorKind::UniqueViolation,
                _
            ))
        )
    }
}

pub struct SignupRepository {
    pool: DbPool,
}

impl SignupRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    // Insert a waitlist signup, at most one row per email
    pub fn add_waitlist_signup(&self, signup: &NewWaitlistSignup) -> Result<(), StoreError> {
        let mut conn = self.pool.get()?;
        diesel::insert_into(waitlist_students::table)
            .values(signup)
            .execute(&mut conn)?;
        Ok(())
    }

    // Insert a pilot application, at most one row per email
    pub fn add_pilot_application(&self, application: &NewPilotApplication) -> Result<(), StoreError> {
        let mut conn = self.pool.get()?;
        diesel::insert_into(pilot_institutions::table)
            .values(application)
            .execute(&mut conn)?;
        Ok(())
    }
}
