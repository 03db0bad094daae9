use super::*;

pub fn migrate(conn: &SqliteConnection) -> Result<()> {
    create_index_department_team(&conn)?;
    create_index_ship_number(&conn)?;

    Ok(())
}

// The list view is filtered by department and team most of the time.
fn create_index_department_team(conn: &SqliteConnection) -> Result<()> {
    sql_query("CREATE INDEX pdr_records_department_team_idx ON pdr_records(department, team)")
        .execute(conn)?;
    Ok(())
}

fn create_index_ship_number(conn: &SqliteConnection) -> Result<()> {
    sql_query("CREATE INDEX pdr_records_ship_number_idx ON pdr_records(ship_number)")
        .execute(conn)?;
    Ok(())
}
