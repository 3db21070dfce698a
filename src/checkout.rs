//! Checkout
//!
//! Order submission state machine:
//!
//! ```text
//! AddressRequired --(address selected, submit)--> Submitting
//! Submitting --(backend error)--> AddressRequired
//! Submitting --(order created)--> CartCleared --(clear attempted)--> AwaitingPayment
//! ```
//!
//! The machine holds no IO; callers drive it with the outcome of each remote call.

use thiserror::Error;

use crate::{
    addresses::AddressId,
    draft::OrderDraft,
    orders::{CreatedOrder, OrderItem, OrderRequest, PaymentStatus, UNPAID_PAYMENT_ID},
    totals::TotalsError,
};

/// Errors raised by checkout transitions.
#[derive(Debug, Error, PartialEq)]
pub enum CheckoutError {
    /// Submission was attempted without a delivery address.
    #[error("select a delivery address")]
    AddressMissing,

    /// A submission is already in flight.
    #[error("order submission already in progress")]
    InFlight,

    /// The order was already placed from this checkout.
    #[error("order already placed")]
    AlreadyPlaced,

    /// An outcome arrived for a transition that was never started.
    #[error("unexpected checkout transition: {0}")]
    UnexpectedTransition(&'static str),

    /// Totals could not be derived from the draft.
    #[error(transparent)]
    Totals(#[from] TotalsError),
}

/// Where the user is handed after a successful submission.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentHandoff {
    /// The order exactly as the backend returned it.
    pub order: CreatedOrder,

    /// Whether the remote cart was cleared.
    pub cart_cleared: bool,
}

/// Current checkout state.
#[derive(Debug, Clone, PartialEq)]
pub enum CheckoutState {
    /// Waiting for an address and a submit; carries the last submission error.
    AddressRequired {
        /// Message of the last failed submission
        last_error: Option<String>,
    },

    /// Order creation is in flight.
    Submitting,

    /// Order created; the remote cart clear is being attempted.
    CartCleared {
        /// Created order
        order: CreatedOrder,
    },

    /// Terminal: hand off to payment.
    AwaitingPayment(PaymentHandoff),
}

/// A checkout session for one draft.
#[derive(Debug, Clone)]
pub struct Checkout {
    draft: OrderDraft,
    state: CheckoutState,
}

impl Checkout {
    /// Start checkout for a draft.
    pub fn new(draft: OrderDraft) -> Self {
        Self {
            draft,
            state: CheckoutState::AddressRequired { last_error: None },
        }
    }

    /// The draft being checked out.
    pub fn draft(&self) -> &OrderDraft {
        &self.draft
    }

    /// Mutable access to the draft, only while no submission has started.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::InFlight`] or [`CheckoutError::AlreadyPlaced`]
    /// once submission has begun.
    pub fn draft_mut(&mut self) -> Result<&mut OrderDraft, CheckoutError> {
        self.ensure_editable()?;

        Ok(&mut self.draft)
    }

    /// Current state
    pub fn state(&self) -> &CheckoutState {
        &self.state
    }

    /// Whether an order creation request is in flight.
    pub fn is_in_flight(&self) -> bool {
        matches!(self.state, CheckoutState::Submitting)
    }

    /// Pick the delivery address.
    ///
    /// # Errors
    ///
    /// Fails once submission has begun.
    pub fn select_address(&mut self, address: AddressId) -> Result<(), CheckoutError> {
        self.ensure_editable()?;

        self.draft.select_address(address);

        Ok(())
    }

    /// Move to `Submitting` and build the order request.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::AddressMissing`]: no address selected; state is unchanged.
    /// - [`CheckoutError::InFlight`] / [`CheckoutError::AlreadyPlaced`]: not in `AddressRequired`.
    /// - [`CheckoutError::Totals`]: totals could not be derived.
    pub fn begin_submission(&mut self, order_ref: String) -> Result<OrderRequest, CheckoutError> {
        self.ensure_editable()?;

        let delivery_address = self
            .draft
            .address()
            .cloned()
            .ok_or(CheckoutError::AddressMissing)?;

        let totals = self.draft.totals()?;

        let request = OrderRequest {
            order_ref,
            items: self.draft.lines().iter().map(OrderItem::from).collect(),
            delivery_address,
            coupon: self.draft.coupon().map(|coupon| coupon.code().clone()),
            totals,
            payment_id: UNPAID_PAYMENT_ID.to_string(),
            payment_status: PaymentStatus::Pending,
        };

        self.state = CheckoutState::Submitting;

        Ok(request)
    }

    /// Record a rejected submission and return to `AddressRequired`.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::UnexpectedTransition`] when not `Submitting`.
    pub fn submission_failed(&mut self, message: impl Into<String>) -> Result<(), CheckoutError> {
        if !self.is_in_flight() {
            return Err(CheckoutError::UnexpectedTransition("submission_failed"));
        }

        self.state = CheckoutState::AddressRequired {
            last_error: Some(message.into()),
        };

        Ok(())
    }

    /// Record the created order and move to `CartCleared`.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::UnexpectedTransition`] when not `Submitting`.
    pub fn order_created(&mut self, order: CreatedOrder) -> Result<(), CheckoutError> {
        if !self.is_in_flight() {
            return Err(CheckoutError::UnexpectedTransition("order_created"));
        }

        self.state = CheckoutState::CartCleared { order };

        Ok(())
    }

    /// Finish the cart clear attempt and hand off to payment.
    ///
    /// A failed clear does not block the handoff.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::UnexpectedTransition`] when not `CartCleared`.
    pub fn cart_clear_finished(&mut self, cleared: bool) -> Result<PaymentHandoff, CheckoutError> {
        let CheckoutState::CartCleared { order } = &self.state else {
            return Err(CheckoutError::UnexpectedTransition("cart_clear_finished"));
        };

        let handoff = PaymentHandoff {
            order: order.clone(),
            cart_cleared: cleared,
        };

        self.state = CheckoutState::AwaitingPayment(handoff.clone());

        Ok(handoff)
    }

    fn ensure_editable(&self) -> Result<(), CheckoutError> {
        match self.state {
            CheckoutState::AddressRequired { .. } => Ok(()),
            CheckoutState::Submitting => Err(CheckoutError::InFlight),
            CheckoutState::CartCleared { .. } | CheckoutState::AwaitingPayment(_) => {
                Err(CheckoutError::AlreadyPlaced)
            }
        }
    }
}
