//! Database schema and migrations for slotbook.
//!
//! This module contains all database migrations that will be applied
//! sequentially when the database is first opened or upgraded.

/// Database migrations.
///
/// Each migration is a SQL script that will be executed in order.
/// The schema_version table tracks which migrations have been applied.
pub const MIGRATIONS: &[&str] = &[
    // v1: Staff table
    r#"
-- Staff members who can be booked
CREATE TABLE staff (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    name        TEXT NOT NULL,
    color       TEXT NOT NULL DEFAULT '#2196F3',  -- identity color for calendar views
    is_active   INTEGER NOT NULL DEFAULT 1,
    created_at  TEXT NOT NULL DEFAULT (datetime('now'))
);
"#,
    // v2: Clients table
    r#"
-- Client records with contact information
CREATE TABLE clients (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    name        TEXT NOT NULL,
    email       TEXT NOT NULL UNIQUE,
    phone       TEXT,
    notes       TEXT,
    created_at  TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX idx_clients_name ON clients(name);
CREATE INDEX idx_clients_phone ON clients(phone);
"#,
    // v3: Service catalog table
    r#"
-- Catalog of bookable services with duration and price
CREATE TABLE services (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    name        TEXT NOT NULL UNIQUE,
    duration    INTEGER NOT NULL,                 -- minutes
    price       REAL NOT NULL DEFAULT 0.0,
    is_active   INTEGER NOT NULL DEFAULT 1
);
"#,
    // v4: Appointments table
    r#"
-- Appointments link clients, services and staff over a half-open interval
CREATE TABLE appointments (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    client_id   INTEGER NOT NULL REFERENCES clients(id) ON DELETE CASCADE,
    service_id  INTEGER NOT NULL REFERENCES services(id),
    staff_id    INTEGER NOT NULL REFERENCES staff(id),
    start_time  TEXT NOT NULL,
    end_time    TEXT NOT NULL,
    status      TEXT NOT NULL DEFAULT 'pending',  -- 'pending', 'confirmed', 'cancelled'
    created_at  TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX idx_appointments_start_time ON appointments(start_time);
CREATE INDEX idx_appointments_staff_start ON appointments(staff_id, start_time);
CREATE INDEX idx_appointments_status ON appointments(status);
"#,
    // v5: Accounts table for authentication
    r#"
-- Login accounts with failure counters for login throttling
CREATE TABLE accounts (
    id                    INTEGER PRIMARY KEY AUTOINCREMENT,
    username              TEXT NOT NULL UNIQUE,
    password_hash         TEXT NOT NULL,           -- Argon2 hash
    role                  TEXT NOT NULL DEFAULT 'staff',  -- 'admin', 'staff'
    staff_id              INTEGER REFERENCES staff(id),
    is_active             INTEGER NOT NULL DEFAULT 1,
    failed_attempts       INTEGER NOT NULL DEFAULT 0,
    locked_until          TEXT,
    must_change_password  INTEGER NOT NULL DEFAULT 1,
    created_at            TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX idx_accounts_username ON accounts(username);
"#,
    // v6: Key-value settings table
    r#"
-- Business settings stored as key-value pairs
CREATE TABLE settings (
    id      INTEGER PRIMARY KEY AUTOINCREMENT,
    key     TEXT NOT NULL UNIQUE,
    value   TEXT NOT NULL
);
"#,
];
