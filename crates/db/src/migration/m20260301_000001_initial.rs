//! Initial database migration.
//!
//! Creates the enum types, ledger tables, source-document tables, triggers
//! and constraints backing the posting engine.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // ============================================================
        // PART 1: ENUMS
        // ============================================================
        db.execute_unprepared(ENUMS_SQL).await?;

        // ============================================================
        // PART 2: CORE TABLES
        // ============================================================
        db.execute_unprepared(USERS_SQL).await?;
        db.execute_unprepared(BUSINESS_UNITS_SQL).await?;

        // ============================================================
        // PART 3: CHART OF ACCOUNTS
        // ============================================================
        db.execute_unprepared(ACCOUNTS_SQL).await?;
        db.execute_unprepared(BUSINESS_UNIT_ACCOUNT_FKS_SQL).await?;

        // ============================================================
        // PART 4: PERIODS & NUMBERING
        // ============================================================
        db.execute_unprepared(ACCOUNTING_PERIODS_SQL).await?;
        db.execute_unprepared(NUMBERING_SERIES_SQL).await?;

        // ============================================================
        // PART 5: JOURNAL
        // ============================================================
        db.execute_unprepared(JOURNAL_ENTRIES_SQL).await?;
        db.execute_unprepared(JOURNAL_LINES_SQL).await?;

        // ============================================================
        // PART 6: SOURCE DOCUMENTS
        // ============================================================
        db.execute_unprepared(BANK_ACCOUNTS_SQL).await?;
        db.execute_unprepared(SALES_INVOICES_SQL).await?;
        db.execute_unprepared(SALES_INVOICE_ITEMS_SQL).await?;
        db.execute_unprepared(PURCHASE_INVOICES_SQL).await?;
        db.execute_unprepared(PURCHASE_INVOICE_ITEMS_SQL).await?;
        db.execute_unprepared(PAYMENTS_SQL).await?;

        // ============================================================
        // PART 7: TRIGGERS & FUNCTIONS
        // ============================================================
        db.execute_unprepared(TRIGGERS_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

// ============================================================
// SQL CONSTANTS
// ============================================================

const ENUMS_SQL: &str = r"
-- Account types
CREATE TYPE account_type AS ENUM (
    'asset',
    'liability',
    'equity',
    'revenue',
    'expense'
);

-- Accounting period status
CREATE TYPE period_status AS ENUM ('OPEN', 'CLOSED');

-- Document kinds carrying a numbering series
CREATE TYPE document_kind AS ENUM (
    'journal_entry',
    'sales_invoice',
    'purchase_invoice',
    'incoming_payment',
    'outgoing_payment'
);

-- Payment direction
CREATE TYPE payment_direction AS ENUM ('incoming', 'outgoing');

-- Source-document invoice status
CREATE TYPE invoice_status AS ENUM ('open', 'settled');
";

const USERS_SQL: &str = r"
CREATE TABLE users (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    email VARCHAR(255) NOT NULL UNIQUE,
    full_name VARCHAR(255) NOT NULL,
    is_active BOOLEAN NOT NULL DEFAULT true,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_users_email ON users(email) WHERE is_active = true;
";

const BUSINESS_UNITS_SQL: &str = r"
CREATE TABLE business_units (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    code VARCHAR(50) NOT NULL UNIQUE,
    name VARCHAR(255) NOT NULL,
    base_currency CHAR(3) NOT NULL,
    -- Designated control accounts; NULL = accounting not enabled for
    -- derived postings. FKs added after the accounts table exists.
    receivable_account_id UUID,
    payable_account_id UUID,
    is_active BOOLEAN NOT NULL DEFAULT true,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_base_currency_format CHECK (base_currency ~ '^[A-Z]{3}$')
);
";

const ACCOUNTS_SQL: &str = r"
CREATE TABLE accounts (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    business_unit_id UUID NOT NULL REFERENCES business_units(id) ON DELETE CASCADE,
    code VARCHAR(20) NOT NULL,
    name VARCHAR(255) NOT NULL,
    description TEXT,
    account_type account_type NOT NULL,
    balance NUMERIC(19, 4) NOT NULL DEFAULT 0,
    is_active BOOLEAN NOT NULL DEFAULT true,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    UNIQUE (business_unit_id, code)
);

CREATE INDEX idx_accounts_unit ON accounts(business_unit_id) WHERE is_active = true;
CREATE INDEX idx_accounts_type ON accounts(business_unit_id, account_type);
";

const BUSINESS_UNIT_ACCOUNT_FKS_SQL: &str = r"
ALTER TABLE business_units
    ADD CONSTRAINT fk_bu_receivable_account
        FOREIGN KEY (receivable_account_id) REFERENCES accounts(id),
    ADD CONSTRAINT fk_bu_payable_account
        FOREIGN KEY (payable_account_id) REFERENCES accounts(id);
";

const ACCOUNTING_PERIODS_SQL: &str = r"
CREATE TABLE accounting_periods (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    business_unit_id UUID NOT NULL REFERENCES business_units(id) ON DELETE CASCADE,
    name VARCHAR(50) NOT NULL,
    start_date DATE NOT NULL,
    end_date DATE NOT NULL,
    status period_status NOT NULL DEFAULT 'OPEN',
    closed_by UUID REFERENCES users(id),
    closed_at TIMESTAMPTZ,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_period_dates CHECK (end_date >= start_date),
    UNIQUE (business_unit_id, name),
    UNIQUE (business_unit_id, start_date)
);

CREATE INDEX idx_periods_unit_dates ON accounting_periods(business_unit_id, start_date, end_date);
CREATE INDEX idx_periods_open ON accounting_periods(business_unit_id, status) WHERE status = 'OPEN';
";

const NUMBERING_SERIES_SQL: &str = r"
CREATE TABLE numbering_series (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    business_unit_id UUID NOT NULL REFERENCES business_units(id) ON DELETE CASCADE,
    document_kind document_kind NOT NULL,
    prefix VARCHAR(20) NOT NULL,
    next_number BIGINT NOT NULL DEFAULT 1,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_next_number_positive CHECK (next_number > 0),
    UNIQUE (business_unit_id, document_kind)
);
";

const JOURNAL_ENTRIES_SQL: &str = r"
CREATE TABLE journal_entries (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    business_unit_id UUID NOT NULL REFERENCES business_units(id) ON DELETE CASCADE,
    accounting_period_id UUID NOT NULL REFERENCES accounting_periods(id),
    document_number VARCHAR(100) NOT NULL,
    posting_date DATE NOT NULL,
    remarks TEXT,
    created_by UUID NOT NULL REFERENCES users(id),
    approved_by UUID REFERENCES users(id),
    posted_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    UNIQUE (business_unit_id, document_number)
);

CREATE INDEX idx_je_unit_date ON journal_entries(business_unit_id, posting_date);
CREATE INDEX idx_je_period ON journal_entries(accounting_period_id);
";

const JOURNAL_LINES_SQL: &str = r"
CREATE TABLE journal_lines (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    journal_entry_id UUID NOT NULL REFERENCES journal_entries(id) ON DELETE CASCADE,
    account_id UUID NOT NULL REFERENCES accounts(id),
    line_no INTEGER NOT NULL,
    debit NUMERIC(19, 4) NOT NULL DEFAULT 0,
    credit NUMERIC(19, 4) NOT NULL DEFAULT 0,
    memo VARCHAR(500),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_debit_or_credit CHECK (
        (debit > 0 AND credit = 0) OR (debit = 0 AND credit > 0)
    ),
    CONSTRAINT chk_line_no_positive CHECK (line_no > 0),
    UNIQUE (journal_entry_id, line_no)
);

CREATE INDEX idx_jl_entry ON journal_lines(journal_entry_id);
CREATE INDEX idx_jl_account ON journal_lines(account_id);
";

const BANK_ACCOUNTS_SQL: &str = r"
CREATE TABLE bank_accounts (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    business_unit_id UUID NOT NULL REFERENCES business_units(id) ON DELETE CASCADE,
    name VARCHAR(255) NOT NULL,
    gl_account_id UUID NOT NULL REFERENCES accounts(id),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_bank_accounts_unit ON bank_accounts(business_unit_id);
";

const SALES_INVOICES_SQL: &str = r"
CREATE TABLE sales_invoices (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    business_unit_id UUID NOT NULL REFERENCES business_units(id) ON DELETE CASCADE,
    invoice_number VARCHAR(100) NOT NULL,
    customer_name VARCHAR(255) NOT NULL,
    invoice_date DATE NOT NULL,
    total NUMERIC(19, 4) NOT NULL,
    status invoice_status NOT NULL DEFAULT 'open',
    journal_entry_id UUID REFERENCES journal_entries(id),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_si_total_positive CHECK (total > 0),
    UNIQUE (business_unit_id, invoice_number)
);

CREATE INDEX idx_si_unit_date ON sales_invoices(business_unit_id, invoice_date);
CREATE INDEX idx_si_open ON sales_invoices(business_unit_id, invoice_date) WHERE status = 'open';
";

const SALES_INVOICE_ITEMS_SQL: &str = r"
CREATE TABLE sales_invoice_items (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    sales_invoice_id UUID NOT NULL REFERENCES sales_invoices(id) ON DELETE CASCADE,
    description VARCHAR(500) NOT NULL,
    amount NUMERIC(19, 4) NOT NULL,
    revenue_account_id UUID NOT NULL REFERENCES accounts(id),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_sii_amount_positive CHECK (amount > 0)
);

CREATE INDEX idx_sii_invoice ON sales_invoice_items(sales_invoice_id);
";

const PURCHASE_INVOICES_SQL: &str = r"
CREATE TABLE purchase_invoices (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    business_unit_id UUID NOT NULL REFERENCES business_units(id) ON DELETE CASCADE,
    invoice_number VARCHAR(100) NOT NULL,
    supplier_name VARCHAR(255) NOT NULL,
    invoice_date DATE NOT NULL,
    total NUMERIC(19, 4) NOT NULL,
    status invoice_status NOT NULL DEFAULT 'open',
    journal_entry_id UUID REFERENCES journal_entries(id),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_pi_total_positive CHECK (total > 0),
    UNIQUE (business_unit_id, invoice_number)
);

CREATE INDEX idx_pi_unit_date ON purchase_invoices(business_unit_id, invoice_date);
CREATE INDEX idx_pi_open ON purchase_invoices(business_unit_id, invoice_date) WHERE status = 'open';
";

const PURCHASE_INVOICE_ITEMS_SQL: &str = r"
CREATE TABLE purchase_invoice_items (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    purchase_invoice_id UUID NOT NULL REFERENCES purchase_invoices(id) ON DELETE CASCADE,
    description VARCHAR(500) NOT NULL,
    amount NUMERIC(19, 4) NOT NULL,
    expense_account_id UUID NOT NULL REFERENCES accounts(id),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_pii_amount_positive CHECK (amount > 0)
);

CREATE INDEX idx_pii_invoice ON purchase_invoice_items(purchase_invoice_id);
";

const PAYMENTS_SQL: &str = r"
CREATE TABLE payments (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    business_unit_id UUID NOT NULL REFERENCES business_units(id) ON DELETE CASCADE,
    direction payment_direction NOT NULL,
    bank_account_id UUID NOT NULL REFERENCES bank_accounts(id),
    payment_date DATE NOT NULL,
    amount NUMERIC(19, 4) NOT NULL,
    remarks TEXT,
    journal_entry_id UUID REFERENCES journal_entries(id),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_payment_amount_positive CHECK (amount > 0)
);

CREATE INDEX idx_payments_unit_date ON payments(business_unit_id, payment_date);
";

const TRIGGERS_SQL: &str = r"
-- Keep updated_at current on row updates
CREATE OR REPLACE FUNCTION set_updated_at()
RETURNS TRIGGER AS $$
BEGIN
    NEW.updated_at = now();
    RETURN NEW;
END;
$$ LANGUAGE plpgsql;

CREATE TRIGGER trg_users_updated_at
    BEFORE UPDATE ON users
    FOR EACH ROW EXECUTE FUNCTION set_updated_at();

CREATE TRIGGER trg_business_units_updated_at
    BEFORE UPDATE ON business_units
    FOR EACH ROW EXECUTE FUNCTION set_updated_at();

CREATE TRIGGER trg_accounts_updated_at
    BEFORE UPDATE ON accounts
    FOR EACH ROW EXECUTE FUNCTION set_updated_at();

CREATE TRIGGER trg_accounting_periods_updated_at
    BEFORE UPDATE ON accounting_periods
    FOR EACH ROW EXECUTE FUNCTION set_updated_at();

CREATE TRIGGER trg_numbering_series_updated_at
    BEFORE UPDATE ON numbering_series
    FOR EACH ROW EXECUTE FUNCTION set_updated_at();

CREATE TRIGGER trg_sales_invoices_updated_at
    BEFORE UPDATE ON sales_invoices
    FOR EACH ROW EXECUTE FUNCTION set_updated_at();

CREATE TRIGGER trg_purchase_invoices_updated_at
    BEFORE UPDATE ON purchase_invoices
    FOR EACH ROW EXECUTE FUNCTION set_updated_at();

CREATE TRIGGER trg_bank_accounts_updated_at
    BEFORE UPDATE ON bank_accounts
    FOR EACH ROW EXECUTE FUNCTION set_updated_at();
";

const DROP_ALL_SQL: &str = r"
DROP TABLE IF EXISTS payments CASCADE;
DROP TABLE IF EXISTS purchase_invoice_items CASCADE;
DROP TABLE IF EXISTS purchase_invoices CASCADE;
DROP TABLE IF EXISTS sales_invoice_items CASCADE;
DROP TABLE IF EXISTS sales_invoices CASCADE;
DROP TABLE IF EXISTS bank_accounts CASCADE;
DROP TABLE IF EXISTS journal_lines CASCADE;
DROP TABLE IF EXISTS journal_entries CASCADE;
DROP TABLE IF EXISTS numbering_series CASCADE;
DROP TABLE IF EXISTS accounting_periods CASCADE;
DROP TABLE IF EXISTS accounts CASCADE;
DROP TABLE IF EXISTS business_units CASCADE;
DROP TABLE IF EXISTS users CASCADE;

DROP FUNCTION IF EXISTS set_updated_at CASCADE;

DROP TYPE IF EXISTS invoice_status;
DROP TYPE IF EXISTS payment_direction;
DROP TYPE IF EXISTS document_kind;
DROP TYPE IF EXISTS period_status;
DROP TYPE IF EXISTS account_type;
";
