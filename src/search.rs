use crate::app::AppState;

/// Push the typed search text into the session and reset the selection to the top.
pub fn apply_search(app: &mut AppState) {
    app.session.set_query(app.search_query.clone());
    app.selected_index = 0;
}

/// Drop the query entirely, showing the whole collection again.
pub fn clear_search(app: &mut AppState) {
    app.search_query.clear();
    apply_search(app);
}
