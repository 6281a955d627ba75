//! Business module identifiers.

wire_enum! {
    /// A bounded business capability that sends and receives envelopes.
    ///
    /// Used for both `source_module` and `target_module`.
    pub enum ModuleId ("module id") {
        /// Owner-facing concierge (chat, avatar, task planning).
        OwnerConcierge => "mod-01-owner-concierge",
        /// WhatsApp CRM (leads, conversations, outbound delivery).
        WhatsappCrm => "mod-02-whatsapp-crm",
        /// Customer registry.
        Customers => "mod-03-clientes",
        /// Appointments and reminders.
        Agenda => "mod-04-agenda",
        /// Charges, payments and collection.
        Billing => "mod-05-faturamento-cobranca",
    }
}
