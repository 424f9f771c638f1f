//! # Invocation Surface
//!
//! Turns a function name and its positional string arguments into a typed request.
//!
//! | Function | Arguments |
//! |----------|-----------|
//! | `addProduct` | ref, description, price, quantity, critical |
//! | `addOrder` | clientRef, productsJSON, quantitiesJSON, totalPrice, orderRef |
//! | `addUser` | login, password, hash |
//! | `setProvision` | ref, provisionQty |
//! | `majProduct` / `depleteStock` | productsJSON, quantitiesJSON, orderRef |
//! | `setTrackingID` | trackingID, orderRef |
//! | `setState` | state, orderRef |
//! | `setTransport` | packageInfoJSON, orderRef, carrierRef |
//! | `read` | key |
//!
//! Argument counts must match exactly. Numbers are parsed here; JSON payloads are parsed by
//! the component that owns them.

use crate::depletion::{parse_lines, DepletionLine};
use crate::error::LedgerError;
use crate::model::product::parse_integer;
use crate::model::{OrderCreate, PackageInfo, ProductCreate};

#[derive(Debug, Clone, PartialEq)]
pub enum Invocation {
    AddProduct(ProductCreate),
    AddOrder(OrderCreate),
    AddUser {
        login: String,
        password: String,
        hash: String,
    },
    SetProvision {
        reference: String,
        provision: i64,
    },
    DepleteStock {
        lines: Vec<DepletionLine>,
        order_ref: String,
    },
    SetTrackingId {
        tracking_id: String,
        order_ref: String,
    },
    SetState {
        state: i64,
        order_ref: String,
    },
    SetTransport {
        package: PackageInfo,
        order_ref: String,
        carrier_ref: String,
    },
    Read {
        key: String,
    },
}

impl Invocation {
    pub fn parse<S: AsRef<str>>(function: &str, args: &[S]) -> Result<Self, LedgerError> {
        let args: Vec<&str> = args.iter().map(AsRef::as_ref).collect();
        let invocation = match function {
            "addProduct" => {
                let [reference, description, price, quantity, critical] =
                    expect::<5>(function, &args)?;
                Invocation::AddProduct(ProductCreate::parse(
                    reference,
                    description,
                    price,
                    quantity,
                    critical,
                )?)
            }
            "addOrder" => {
                let [client_ref, products, quantities, total_price, order_ref] =
                    expect::<5>(function, &args)?;
                Invocation::AddOrder(OrderCreate::parse(
                    client_ref,
                    products,
                    quantities,
                    total_price,
                    order_ref,
                )?)
            }
            "addUser" => {
                let [login, password, hash] = expect::<3>(function, &args)?;
                Invocation::AddUser {
                    login: login.to_string(),
                    password: password.to_string(),
                    hash: hash.to_string(),
                }
            }
            "setProvision" => {
                let [reference, provision] = expect::<2>(function, &args)?;
                Invocation::SetProvision {
                    reference: reference.to_string(),
                    provision: parse_integer("provision", provision)?,
                }
            }
            "majProduct" | "depleteStock" => {
                let [products, quantities, order_ref] = expect::<3>(function, &args)?;
                Invocation::DepleteStock {
                    lines: parse_lines(products, quantities)?,
                    order_ref: order_ref.to_string(),
                }
            }
            "setTrackingID" => {
                let [tracking_id, order_ref] = expect::<2>(function, &args)?;
                Invocation::SetTrackingId {
                    tracking_id: tracking_id.to_string(),
                    order_ref: order_ref.to_string(),
                }
            }
            "setState" => {
                let [state, order_ref] = expect::<2>(function, &args)?;
                Invocation::SetState {
                    state: parse_integer("state", state)?,
                    order_ref: order_ref.to_string(),
                }
            }
            "setTransport" => {
                let [package, order_ref, carrier_ref] = expect::<3>(function, &args)?;
                Invocation::SetTransport {
                    package: PackageInfo::parse(package)?,
                    order_ref: order_ref.to_string(),
                    carrier_ref: carrier_ref.to_string(),
                }
            }
            "read" => {
                let [key] = expect::<1>(function, &args)?;
                Invocation::Read {
                    key: key.to_string(),
                }
            }
            unknown => {
                return Err(LedgerError::InvalidArgument(format!(
                    "unknown function {unknown:?}"
                )))
            }
        };
        Ok(invocation)
    }

    /// Canonical function name.
    pub fn name(&self) -> &'static str {
        match self {
            Invocation::AddProduct(_) => "addProduct",
            Invocation::AddOrder(_) => "addOrder",
            Invocation::AddUser { .. } => "addUser",
            Invocation::SetProvision { .. } => "setProvision",
            Invocation::DepleteStock { .. } => "depleteStock",
            Invocation::SetTrackingId { .. } => "setTrackingID",
            Invocation::SetState { .. } => "setState",
            Invocation::SetTransport { .. } => "setTransport",
            Invocation::Read { .. } => "read",
        }
    }
}

fn expect<'a, const N: usize>(
    function: &str,
    args: &[&'a str],
) -> Result<[&'a str; N], LedgerError> {
    <[&str; N]>::try_from(args).map_err(|_| {
        LedgerError::InvalidArgument(format!(
            "{function} expects {N} arguments, got {}",
            args.len()
        ))
    })
}
