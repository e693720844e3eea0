//! Response bodies placed in envelope `details`.
//!
//! Password hashes never leave the server.

use serde::Serialize;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::repos::orders::{CartLine, Order};
use crate::repos::products::{Product, Sizing};
use crate::repos::users::User;

fn rfc3339(ts: Option<OffsetDateTime>) -> Option<String> {
    ts.and_then(|t| t.format(&Rfc3339).ok())
}

#[derive(Debug, Serialize)]
pub struct UserView {
    pub id: i64,
    pub username: String,
    pub dob: String,
    pub role: String,
    pub chest: f64,
    pub waist: f64,
    pub hip: f64,
    #[serde(rename = "createdAt", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl From<User> for UserView {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            dob: user.dob,
            role: user.role,
            chest: user.chest,
            waist: user.waist,
            hip: user.hip,
            created_at: rfc3339(user.created_at),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ListUsersView {
    pub users: Vec<UserView>,
}

#[derive(Debug, Serialize)]
pub struct ProductView {
    pub id: i64,
    pub item: String,
    pub price: f64,
    pub stock: i32,
    pub pictures: Vec<String>,
    pub xs: Option<Sizing>,
    pub s: Option<Sizing>,
    pub m: Option<Sizing>,
    pub l: Option<Sizing>,
    pub xl: Option<Sizing>,
}

impl From<Product> for ProductView {
    fn from(p: Product) -> Self {
        Self {
            id: p.id,
            item: p.item,
            price: p.price,
            stock: p.stock,
            pictures: p.pictures,
            xs: p.xs,
            s: p.s,
            m: p.m,
            l: p.l,
            xl: p.xl,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct OrderView {
    pub id: i64,
    pub total: f64,
    pub status: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub snapshots: Vec<CartLine>,
    #[serde(rename = "userID")]
    pub user_id: i64,
    #[serde(rename = "createdAt", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl From<Order> for OrderView {
    fn from(o: Order) -> Self {
        Self {
            id: o.id,
            total: o.total,
            status: o.status,
            snapshots: o.snapshots,
            user_id: o.user_id,
            created_at: rfc3339(o.created_at),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ListOrdersView {
    pub orders: Vec<OrderView>,
}

impl From<Vec<Order>> for ListOrdersView {
    fn from(orders: Vec<Order>) -> Self {
        Self {
            orders: orders.into_iter().map(OrderView::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::UserView;
    use crate::repos::users::User;

    #[test]
    fn user_view_has_no_password() {
        let view = UserView::from(User {
            id: 1,
            username: "alice".into(),
            password_hash: "$argon2id$secret".into(),
            ..Default::default()
        });
        let json = serde_json::to_string(&view).unwrap();
        assert!(!json.contains("argon2"));
        assert!(!json.contains("password"));
    }
}
