use std::path::Path;

use crate::error::Result;
use crate::models::Order;

/// Write order history to a CSV file, one row per order.
pub fn write_orders_csv(orders: &[Order], path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "order_id",
        "created_at",
        "status",
        "delivery_type",
        "items",
        "item_count",
        "subtotal",
        "tax",
        "delivery_fee",
        "total",
    ])?;

    for order in orders {
        let items = order
            .items
            .iter()
            .map(|i| format!("{}x {}", i.quantity, i.base_name))
            .collect::<Vec<_>>()
            .join("; ");

        wtr.write_record([
            order.id.clone(),
            order.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            order.status.to_string(),
            order.delivery_type.to_string(),
            items,
            order.item_count().to_string(),
            format!("{:.2}", order.subtotal.as_dollars()),
            format!("{:.2}", order.tax.as_dollars()),
            format!("{:.2}", order.delivery_fee.as_dollars()),
            format!("{:.2}", order.total.as_dollars()),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
