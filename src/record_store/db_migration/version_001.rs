use super::*;

pub fn migrate(conn: &SqliteConnection) -> Result<()> {
    create_table_pdr_records(&conn)?;

    Ok(())
}

// One row per Post-Delivery Revision. Every column but the id carries a default, so
// partially filled records can be inserted and read back in the canonical shape.
// AUTOINCREMENT keeps ids of deleted records from being handed out again.
fn create_table_pdr_records(conn: &SqliteConnection) -> Result<()> {
    sql_query(
        "CREATE TABLE pdr_records(
                id                              INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL,

                department                      TEXT NOT NULL DEFAULT '',
                group_name                      TEXT NOT NULL DEFAULT '',
                team                            TEXT NOT NULL DEFAULT '',
                year                            INTEGER NOT NULL
                                                DEFAULT (CAST(strftime('%Y', 'now') AS INTEGER)),
                billing_month                   TEXT NOT NULL DEFAULT '',
                ship_number                     TEXT NOT NULL DEFAULT '',
                revision_series_number          TEXT NOT NULL DEFAULT '',
                revision_number                 TEXT NOT NULL DEFAULT '',
                industry_number                 TEXT NOT NULL DEFAULT '',
                block_name_or_drawing_name      TEXT NOT NULL DEFAULT '',
                drawing_number                  TEXT NOT NULL DEFAULT '',
                issuance_date                   TEXT NOT NULL DEFAULT '',
                original_t_dreams_delivery      TEXT NOT NULL DEFAULT '',
                manhour_spent                   REAL NOT NULL DEFAULT 0,
                responsible_team                TEXT NOT NULL DEFAULT '',
                origin                          TEXT NOT NULL DEFAULT '',
                designer                        TEXT NOT NULL DEFAULT '',
                checker                         TEXT NOT NULL DEFAULT '',
                revised_by                      TEXT NOT NULL DEFAULT '',
                reason_of_revision              TEXT NOT NULL DEFAULT '',
                design_update_code              TEXT NOT NULL DEFAULT '',
                from_d_number                   TEXT NOT NULL DEFAULT '',
                type_of_error                   TEXT NOT NULL DEFAULT '',
                detail_cause_of_error           TEXT NOT NULL DEFAULT '',
                general_cause_of_error          TEXT NOT NULL DEFAULT '',
                damage                          TEXT NOT NULL DEFAULT 'N',
                number_of_piece_with_damage     INTEGER NOT NULL DEFAULT 0,
                number_of_piece_without_damage  INTEGER NOT NULL DEFAULT 0,
                cost_of_damage                  REAL NOT NULL DEFAULT 0,
                remarks                         TEXT NOT NULL DEFAULT '',
                revision_family_number          TEXT NOT NULL DEFAULT '',
                add_info                        TEXT NOT NULL DEFAULT '',
                update_info                     TEXT NOT NULL DEFAULT ''
             )",
    )
    .execute(conn)?;

    Ok(())
}
