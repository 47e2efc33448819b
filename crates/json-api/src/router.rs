//! App Router

use salvo::Router;

use crate::{auth, healthcheck, lists, products};

/// Every documented route. Routes below an `auth::middleware` hoop require a
/// bearer token.
pub(crate) fn app_router() -> Router {
    Router::new()
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(
            Router::with_path("auth")
                .push(Router::with_path("signup").post(auth::handlers::signup::handler))
                .push(Router::with_path("signin").post(auth::handlers::signin::handler))
                .push(
                    Router::with_path("signout")
                        .hoop(auth::middleware::handler)
                        .post(auth::handlers::signout::handler),
                ),
        )
        .push(
            Router::with_path("products")
                .get(products::index::handler)
                .push(Router::with_path("{product}").get(products::get::handler))
                .push(
                    Router::new()
                        .hoop(auth::middleware::handler)
                        .post(products::create::handler)
                        .push(
                            Router::with_path("{product}")
                                .patch(products::update::handler)
                                .delete(products::delete::handler)
                                .push(
                                    Router::with_path("wishlist")
                                        .post(lists::upsert::wishlist)
                                        .delete(lists::remove::wishlist),
                                )
                                .push(
                                    Router::with_path("cart")
                                        .post(lists::upsert::cart)
                                        .delete(lists::remove::cart),
                                ),
                        ),
                ),
        )
        .push(
            Router::with_path("users")
                .hoop(auth::middleware::handler)
                .push(Router::with_path("wishlist").get(lists::get::wishlist))
                .push(Router::with_path("cart").get(lists::get::cart)),
        )
}
