//! API route configuration.

use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::api::handlers::{
    confirm_request_handler, create_animal_handler, create_feedback_handler,
    create_request_handler, create_shelter_handler, delete_animal_handler,
    delete_feedback_handler, delete_shelter_handler, get_animal_handler, get_shelter_handler,
    list_animals_handler, list_feedback_handler, list_requests_by_shelter_handler,
    list_saved_animals_handler, list_saved_shelters_handler, list_shelters_handler,
    reject_request_handler, save_animal_handler, save_shelter_handler, unsave_animal_handler,
    unsave_shelter_handler, update_animal_handler, update_shelter_handler,
};
use crate::state::AppState;

/// All `/api` routes.
///
/// # Endpoints
///
/// - `GET    /shelters`                      - List shelters
/// - `POST   /shelters`                      - Create a shelter (+address)
/// - `GET    /shelters/{slug}`               - Shelter with address/animals
/// - `PATCH  /shelters/{slug}`               - Update (rename re-slugs)
/// - `DELETE /shelters/{slug}`               - Cascade delete
/// - `GET    /shelters/{slug}/feedback`      - List reviews
/// - `POST   /shelters/{slug}/feedback`      - Add review (aggregate update)
/// - `DELETE /feedback/{id}`                 - Remove own review
/// - `GET    /animals`                       - List animals
/// - `POST   /animals`                       - Create an animal
/// - `GET    /animals/{slug}`                - One animal
/// - `PATCH  /animals/{slug}`                - Update (rename re-slugs)
/// - `DELETE /animals/{slug}`                - Cascade delete
/// - `GET    /adoption-requests/by-shelter/{slug}` - Requests per shelter
/// - `POST   /adoption-requests`             - File a request (reserve)
/// - `DELETE /adoption-requests/{id}`        - Reject (free the animal)
/// - `POST   /adoption-requests/{id}/confirm`- Confirm (cascade removal)
/// - `GET|POST|DELETE /saved/animals[...]`   - Saved animals
/// - `GET|POST|DELETE /saved/shelters[...]`  - Saved shelters
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/shelters",
            get(list_shelters_handler).post(create_shelter_handler),
        )
        .route(
            "/shelters/{slug}",
            get(get_shelter_handler)
                .patch(update_shelter_handler)
                .delete(delete_shelter_handler),
        )
        .route(
            "/shelters/{slug}/feedback",
            get(list_feedback_handler).post(create_feedback_handler),
        )
        .route("/feedback/{id}", delete(delete_feedback_handler))
        .route(
            "/animals",
            get(list_animals_handler).post(create_animal_handler),
        )
        .route(
            "/animals/{slug}",
            get(get_animal_handler)
                .patch(update_animal_handler)
                .delete(delete_animal_handler),
        )
        .route(
            "/adoption-requests/by-shelter/{slug}",
            get(list_requests_by_shelter_handler),
        )
        .route("/adoption-requests", post(create_request_handler))
        .route("/adoption-requests/{id}", delete(reject_request_handler))
        .route(
            "/adoption-requests/{id}/confirm",
            post(confirm_request_handler),
        )
        .route(
            "/saved/animals",
            get(list_saved_animals_handler),
        )
        .route(
            "/saved/animals/{slug}",
            post(save_animal_handler).delete(unsave_animal_handler),
        )
        .route(
            "/saved/shelters",
            get(list_saved_shelters_handler),
        )
        .route(
            "/saved/shelters/{slug}",
            post(save_shelter_handler).delete(unsave_shelter_handler),
        )
}
