// Database schema - must be kept up to date manually with the record_store migrations.
table! {
    pdr_records (id) {
        id -> BigInt,

        department -> Text,
        group_name -> Text,
        team -> Text,
        year -> Integer,
        billing_month -> Text,
        ship_number -> Text,
        revision_series_number -> Text,
        revision_number -> Text,
        industry_number -> Text,
        block_name_or_drawing_name -> Text,
        drawing_number -> Text,
        issuance_date -> Text,
        original_t_dreams_delivery -> Text,
        manhour_spent -> Double,
        responsible_team -> Text,
        origin -> Text,
        designer -> Text,
        checker -> Text,
        revised_by -> Text,
        reason_of_revision -> Text,
        design_update_code -> Text,
        from_d_number -> Text,
        type_of_error -> Text,
        detail_cause_of_error -> Text,
        general_cause_of_error -> Text,
        damage -> Text,
        number_of_piece_with_damage -> Integer,
        number_of_piece_without_damage -> Integer,
        cost_of_damage -> Double,
        remarks -> Text,
        revision_family_number -> Text,
        add_info -> Text,
        update_info -> Text,
    }
}
