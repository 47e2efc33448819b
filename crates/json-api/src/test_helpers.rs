//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use rust_decimal::Decimal;
use salvo::{affix_state::inject, prelude::*};

use marketplace_app::{
    auth::MockAuthService,
    context::AppContext,
    domain::{
        accounts::{
            MockAccountsService,
            records::{AccountRecord, Role, UserId},
        },
        lists::{
            MockListsService,
            records::{ListKind, ListLine, Snapshot},
        },
        products::{
            MockProductsService,
            records::{ProductId, ProductRecord},
        },
    },
    media::MockMediaService,
};

use crate::{extensions::*, state::State};

pub(crate) const TEST_USER_ID: UserId = UserId::from_i64(1);

#[salvo::handler]
pub(crate) async fn inject_user(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_user_id(TEST_USER_ID);
    ctrl.call_next(req, depot, res).await;
}

/// Mocked services for handler tests. Any call without an expectation fails
/// the test.
#[derive(Default)]
pub(crate) struct MockApp {
    pub(crate) products: MockProductsService,
    pub(crate) lists: MockListsService,
    pub(crate) accounts: MockAccountsService,
    pub(crate) auth: MockAuthService,
    pub(crate) media: MockMediaService,
}

impl MockApp {
    pub(crate) fn into_state(self) -> Arc<State> {
        State::from_app_context(AppContext {
            products: Arc::new(self.products),
            lists: Arc::new(self.lists),
            accounts: Arc::new(self.accounts),
            auth: Arc::new(self.auth),
            media: Arc::new(self.media),
        })
    }

    /// Serve `route` as the authenticated [`TEST_USER_ID`].
    pub(crate) fn authenticated_service(self, route: Router) -> Service {
        Service::new(
            Router::new()
                .hoop(inject(self.into_state()))
                .hoop(inject_user)
                .push(route),
        )
    }

    /// Serve `route` without any authenticated user.
    pub(crate) fn anonymous_service(self, route: Router) -> Service {
        Service::new(Router::new().hoop(inject(self.into_state())).push(route))
    }
}

pub(crate) fn make_product(id: i64, owner: UserId) -> ProductRecord {
    ProductRecord {
        id: ProductId::from_i64(id),
        owner_id: owner,
        title: "Ankara fabric".to_string(),
        price: Decimal::new(190_000, 2),
        discount: Decimal::ZERO,
        weight: Decimal::new(2_000, 2),
        description: "Six yards of printed cotton".to_string(),
        stock: 12,
        images: vec!["https://res.cloudinary.com/demo/image/upload/v1/mama-ologi/u1/a.png".into()],
        deleted: false,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_account(id: UserId, email: &str) -> AccountRecord {
    AccountRecord {
        id,
        email: email.to_string(),
        first_name: "Ada".to_string(),
        last_name: "Obi".to_string(),
        phone: Some("+2348000000000".to_string()),
        address: None,
        street: None,
        state: None,
        country: "Nigeria".to_string(),
        role: Role::Customer,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

/// A one-line list for `product` at quantity 4, priced 1900.00 and weighing
/// 20.00 each.
pub(crate) fn make_snapshot(kind: ListKind, product: ProductId) -> Snapshot {
    let cart = kind == ListKind::Cart;

    Snapshot {
        kind,
        lines: vec![ListLine {
            quantity: 4,
            product_id: product,
            product_title: "Ankara fabric".to_string(),
            product_price: Decimal::new(190_000, 2),
            total_price: Decimal::new(760_000, 2),
            product_weight: Decimal::new(2_000, 2),
            total_weight: Decimal::new(8_000, 2),
            product_stock: cart.then_some(12),
            product_discount: cart.then_some(Decimal::ZERO),
        }],
    }
}
