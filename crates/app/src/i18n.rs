//! English and Tamil label tables.
//!
//! Navigation labels live on [`shared_types::NavItem`]; everything else a
//! page prints in both languages is here. Campaign pages are English-only.

use dioxus::prelude::*;
use shared_types::Language;

/// Selected UI language. Client-side only; resets on reload.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LanguageState {
    pub language: Signal<Language>,
}

impl LanguageState {
    pub fn new() -> Self {
        Self {
            language: Signal::new(Language::En),
        }
    }

    pub fn set(&mut self, language: Language) {
        self.language.set(language);
    }
}

pub fn use_language() -> LanguageState {
    use_context::<LanguageState>()
}

/// Labels for the current language. Re-renders when the language changes.
pub fn use_strings() -> &'static Strings {
    let state = use_language();
    let language = *state.language.read();
    strings(language)
}

pub fn strings(language: Language) -> &'static Strings {
    match language {
        Language::En => &EN,
        Language::Ta => &TA,
    }
}

pub struct Strings {
    pub logout: &'static str,
    pub login: LoginText,
    pub home: HomeText,
    pub location: LocationText,
    pub bills: BillsText,
    pub users: UsersText,
    pub reports: ReportsText,
    pub profile: ProfileText,
}

pub struct LoginText {
    pub portal_entry: &'static str,
    pub subtitle: &'static str,
    pub personnel: &'static str,
    pub admin_node: &'static str,
    pub identity_endpoint: &'static str,
    pub security_key: &'static str,
    pub establish_connection: &'static str,
    pub processing: &'static str,
    pub error_empty: &'static str,
}

pub struct HomeText {
    pub workspace: &'static str,
    pub workspace_sub: &'static str,
    pub shift_active: &'static str,
    pub offline: &'static str,
    pub shift_manager: &'static str,
    pub shift_sub: &'static str,
    pub start_shift: &'static str,
    pub stop_shift: &'static str,
    pub recent_attendance: &'static str,
    pub view_history: &'static str,
    pub date: &'static str,
    pub start: &'static str,
    pub end: &'static str,
    pub duration: &'static str,
    pub command_center: &'static str,
    pub command_sub: &'static str,
    pub active_shifts: &'static str,
    pub attendance_monitor: &'static str,
    pub personnel: &'static str,
    pub location: &'static str,
    pub status: &'static str,
    pub completed: &'static str,
    pub working: &'static str,
    pub pending_bills: &'static str,
    pub otp_required: &'static str,
    pub otp_sub: &'static str,
    pub verify: &'static str,
    pub cancel: &'static str,
    pub waiting_otp: &'static str,
    pub pending_otp_requests: &'static str,
    pub generate_otp: &'static str,
    pub code_generated: &'static str,
    pub requested_at: &'static str,
    pub deny_request: &'static str,
    pub auto_regen: &'static str,
    pub location_sharing: &'static str,
    pub sharing_active: &'static str,
    pub broadcast_on: &'static str,
    pub broadcast_off: &'static str,
    pub share: ShareText,
}

pub struct ShareText {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub whatsapp: &'static str,
    pub copy_link: &'static str,
    pub copied: &'static str,
}

pub struct LocationText {
    pub fleet_tracking: &'static str,
    pub location_dashboard: &'static str,
    pub admin_sub: &'static str,
    pub emp_sub: &'static str,
    pub online_personnel: &'static str,
    pub syncing_live: &'static str,
    pub session_history: &'static str,
    pub audit_sub: &'static str,
    pub date: &'static str,
    pub check_in: &'static str,
    pub check_out: &'static str,
    pub total_duration: &'static str,
    pub live: &'static str,
    pub hrs: &'static str,
    pub no_logs: &'static str,
    pub share: &'static str,
}

pub struct BillsText {
    pub expense_approvals: &'static str,
    pub expense_hub: &'static str,
    pub admin_sub: &'static str,
    pub emp_sub: &'static str,
    pub new_claim: &'static str,
    pub refine_view: &'static str,
    pub process_status: &'static str,
    pub all_transactions: &'static str,
    pub pending_review: &'static str,
    pub approved: &'static str,
    pub rejected: &'static str,
    pub category: &'static str,
    pub all_categories: &'static str,
    pub approve: &'static str,
    pub reject: &'static str,
    pub no_records: &'static str,
    pub expense_entry: &'static str,
    pub ai_sub: &'static str,
    pub analyzing: &'static str,
    pub replace: &'static str,
    pub select: &'static str,
    pub date: &'static str,
    pub amount: &'static str,
    pub classification: &'static str,
    pub description: &'static str,
    pub brief: &'static str,
    pub authorize: &'static str,
    pub processing: &'static str,
    pub start_date: &'static str,
    pub end_date: &'static str,
}

pub struct UsersText {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub directory: &'static str,
    pub add_employee: &'static str,
    pub search_placeholder: &'static str,
    pub name: &'static str,
    pub email: &'static str,
    pub designation: &'static str,
    pub role: &'static str,
    pub status: &'static str,
    pub active: &'static str,
    pub disabled: &'static str,
    pub new_employee: &'static str,
    pub form_name: &'static str,
    pub form_email: &'static str,
    pub form_designation: &'static str,
    pub form_mobile: &'static str,
    pub form_password: &'static str,
    pub cancel: &'static str,
    pub confirm: &'static str,
    pub deny: &'static str,
    pub grant: &'static str,
    pub actions: &'static str,
}

pub struct ReportsText {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub expense_trends: &'static str,
    pub trends_sub: &'static str,
    pub month: &'static str,
    pub total: &'static str,
    pub audit_trail: &'static str,
    pub audit_sub: &'static str,
    pub search_placeholder: &'static str,
    pub personnel: &'static str,
    pub date: &'static str,
    pub check_in: &'static str,
    pub check_out: &'static str,
    pub location_context: &'static str,
    pub session_length: &'static str,
    pub active_now: &'static str,
    pub no_records: &'static str,
    pub hrs: &'static str,
}

pub struct ProfileText {
    pub email: &'static str,
    pub access_level: &'static str,
    pub preferences: &'static str,
    pub language: &'static str,
    pub account_session: &'static str,
    pub session_sub: &'static str,
    pub logout: &'static str,
}

pub static EN: Strings = Strings {
    logout: "Logout",
    login: LoginText {
        portal_entry: "Portal Entry",
        subtitle: "Enter your enterprise credentials to connect.",
        personnel: "Personnel",
        admin_node: "Admin Node",
        identity_endpoint: "Identity Endpoint",
        security_key: "Security Key",
        establish_connection: "Establish Connection",
        processing: "Processing...",
        error_empty: "Please provide a valid workspace identity.",
    },
    home: HomeText {
        workspace: "My Workspace",
        workspace_sub: "Manage your active duty and operational status.",
        shift_active: "Shift Active",
        offline: "Offline",
        shift_manager: "Shift Manager",
        shift_sub: "Establish your operational node. Start/Stop requires Admin OTP verification.",
        start_shift: "Start Shift",
        stop_shift: "Stop Shift",
        recent_attendance: "Recent Attendance",
        view_history: "View Full History",
        date: "Date",
        start: "Session Start",
        end: "Session End",
        duration: "Duration",
        command_center: "Command Center",
        command_sub: "Real-time organizational health and workforce management.",
        active_shifts: "Active Shifts",
        attendance_monitor: "Attendance Monitor",
        personnel: "Personnel",
        location: "Location",
        status: "Status",
        completed: "Completed",
        working: "Working",
        pending_bills: "Pending Bills",
        otp_required: "OTP Verification Required",
        otp_sub: "Ask Admin for the 6-digit code. Valid for 2 mins.",
        verify: "Verify OTP",
        cancel: "Cancel Request",
        waiting_otp: "Waiting for Admin to generate OTP...",
        pending_otp_requests: "Shift Access Authorizations",
        generate_otp: "Authorize & Generate OTP",
        code_generated: "Unique OTP for ",
        requested_at: "Requested ",
        deny_request: "Deny Access",
        auto_regen: "Auto-regenerating new code...",
        location_sharing: "Share Location",
        sharing_active: "Location Shared",
        broadcast_on: "Live Feed Active",
        broadcast_off: "Live Feed Paused",
        share: ShareText {
            title: "Share Live Location",
            subtitle: "Select how you want to share your current coordinates.",
            whatsapp: "WhatsApp",
            copy_link: "Copy Maps Link",
            copied: "Link Copied!",
        },
    },
    location: LocationText {
        fleet_tracking: "Fleet Tracking",
        location_dashboard: "Location Dashboard",
        admin_sub: "Monitoring field activity and service coverage across the region.",
        emp_sub: "View your live telemetry and shift history in one place.",
        online_personnel: "Online Personnel",
        syncing_live: "Syncing Live",
        session_history: "Session History",
        audit_sub: "Audit of professional node activity",
        date: "Date",
        check_in: "Check In",
        check_out: "Check Out",
        total_duration: "Total Duration",
        live: "LIVE",
        hrs: "HRS",
        no_logs: "No professional logs found in the core system.",
        share: "Share",
    },
    bills: BillsText {
        expense_approvals: "Expense Approvals",
        expense_hub: "Expense Hub",
        admin_sub: "Review workforce expenditure and verify digital receipts.",
        emp_sub: "Submit your business bills for seamless reimbursement processing.",
        new_claim: "New Expense Claim",
        refine_view: "Refine View",
        process_status: "Process Status",
        all_transactions: "All Transactions",
        pending_review: "Pending Review",
        approved: "Approved",
        rejected: "Rejected",
        category: "Expense Category",
        all_categories: "All Categories",
        approve: "Approve",
        reject: "Reject",
        no_records: "No expenditure records found",
        expense_entry: "Expense Entry",
        ai_sub: "Upload receipt for Gemini AI auto-analysis.",
        analyzing: "Gemini AI Analyzing Receipt...",
        replace: "Replace Image",
        select: "Select Bill Image",
        date: "Transaction Date",
        amount: "Total Amount",
        classification: "Classification",
        description: "Context / Description",
        brief: "Business purpose for this expenditure...",
        authorize: "Authorize Submission",
        processing: "Processing Intelligence...",
        start_date: "Start Date",
        end_date: "End Date",
    },
    users: UsersText {
        title: "User Management",
        subtitle: "Administer your global workforce and assign organizational roles.",
        directory: "Personnel Directory",
        add_employee: "Add Employee",
        search_placeholder: "Search by name, email or role...",
        name: "Name",
        email: "Email",
        designation: "Designation",
        role: "Role",
        status: "Status",
        active: "Active",
        disabled: "Denied",
        new_employee: "Register New Personnel",
        form_name: "Full Name",
        form_email: "Business Email",
        form_designation: "Primary Designation",
        form_mobile: "Mobile Number",
        form_password: "Access Password",
        cancel: "Cancel",
        confirm: "Establish Identity",
        deny: "Deny Access",
        grant: "Grant Access",
        actions: "Operations",
    },
    reports: ReportsText {
        title: "Business Intelligence",
        subtitle: "Deep insights into organizational performance and history.",
        expense_trends: "Expense Trends",
        trends_sub: "Monthly organizational costs",
        month: "Month",
        total: "Total",
        audit_trail: "Attendance Audit Trail",
        audit_sub: "Complete record of all employee check-in and check-out events.",
        search_placeholder: "Search by Employee Name or ID...",
        personnel: "Employee Details",
        date: "Date",
        check_in: "Check In",
        check_out: "Check Out",
        location_context: "Location Context",
        session_length: "Session Length",
        active_now: "Active Now",
        no_records: "No matching records found in database",
        hrs: "hrs",
    },
    profile: ProfileText {
        email: "Email Address",
        access_level: "Access Level",
        preferences: "System Preferences",
        language: "Language",
        account_session: "Account Session",
        session_sub: "Logging out will securely end your current workspace session.",
        logout: "Logout Now",
    },
};

pub static TA: Strings = Strings {
    logout: "வெளியேறு",
    login: LoginText {
        portal_entry: "போர்ட்டல் நுழைவு",
        subtitle: "இணைக்க உங்கள் நிறுவன நற்சான்றிதழ்களை உள்ளிடவும்.",
        personnel: "பணியாளர்கள்",
        admin_node: "நிர்வாக முனை",
        identity_endpoint: "அடையாள முனை",
        security_key: "பாதுகாப்பு சாவி",
        establish_connection: "இணைப்பை ஏற்படுத்து",
        processing: "செயலாக்கம்...",
        error_empty: "செல்லுபடியாகும் பணியிட அடையாளத்தை வழங்கவும்.",
    },
    home: HomeText {
        workspace: "எனது பணியிடம்",
        workspace_sub: "உங்கள் செயலில் உள்ள பணி மற்றும் செயல்பாட்டு நிலையை நிர்வகிக்கவும்.",
        shift_active: "ஷிப்ட் செயலில் உள்ளது",
        offline: "ஆஃப்லைன்",
        shift_manager: "ஷிப்ட் மேலாளர்",
        shift_sub: "உங்கள் செயல்பாட்டு முனையை நிறுவவும். தொடங்க/நிறுத்த நிர்வாகி OTP சரிபார்ப்பு தேவை.",
        start_shift: "ஷிப்ட் தொடங்கு",
        stop_shift: "ஷிப்ட் நிறுத்து",
        recent_attendance: "சமீபத்திய வருகை",
        view_history: "முழு வரலாற்றைக் காண்க",
        date: "தேதி",
        start: "அமர்வு தொடக்கம்",
        end: "அமர்வு முடிவு",
        duration: "காலம்",
        command_center: "கட்டளை மையம்",
        command_sub: "நிறுவன ஆரோக்கியம் மற்றும் பணியாளர் மேலாண்மை நிகழ்நேரத்தில்.",
        active_shifts: "செயலில் உள்ள ஷிப்ட்கள்",
        attendance_monitor: "வருகை கண்காணிப்பு",
        personnel: "பணியாளர்கள்",
        location: "இடம்",
        status: "நிலை",
        completed: "முடிந்தது",
        working: "வேலை செய்கிறது",
        pending_bills: "நிலுவையில் உள்ள பில்கள்",
        otp_required: "OTP சரிபார்ப்பு தேவை",
        otp_sub: "நிர்வாகியிடம் 6 இலக்கக் குறியீட்டைக் கேட்கவும். 2 நிமிடங்கள் மட்டுமே செல்லும்.",
        verify: "OTP சரிபார்க்கவும்",
        cancel: "கோரிக்கையை ரத்துசெய்",
        waiting_otp: "நிர்வாகி OTP ஐ உருவாக்கும் வரை காத்திருக்கிறது...",
        pending_otp_requests: "ஷிப்ட் அணுகல் அங்கீகாரங்கள்",
        generate_otp: "அங்கீகரிக்கவும் & OTP ஐ உருவாக்கவும்",
        code_generated: "தனிப்பட்ட OTP: ",
        requested_at: "கோரப்பட்டது ",
        deny_request: "அணுகலை மறுக்கவும்",
        auto_regen: "புதிய குறியீடு தானாக உருவாக்கப்படுகிறது...",
        location_sharing: "இருப்பிடத்தைப் பகிரவும்",
        sharing_active: "பகிரப்படுகிறது",
        broadcast_on: "நேரடி ஊட்டம் செயலில் உள்ளது",
        broadcast_off: "நேரடி ஊட்டம் நிறுத்தப்பட்டது",
        share: ShareText {
            title: "நேரடி இருப்பிடத்தைப் பகிரவும்",
            subtitle: "உங்கள் தற்போதைய இருப்பிடத்தை எவ்வாறு பகிர வேண்டும் என்பதைத் தேர்ந்தெடுக்கவும்.",
            whatsapp: "வாட்ஸ்அப்",
            copy_link: "இணைப்பை நகலெடுக்கவும்",
            copied: "நகலெடுக்கப்பட்டது!",
        },
    },
    location: LocationText {
        fleet_tracking: "கடற்படை கண்காணிப்பு",
        location_dashboard: "இருப்பிட டாஷ்போர்டு",
        admin_sub: "பிராந்தியம் முழுவதும் கள செயல்பாடு மற்றும் சேவை கவரேஜை கண்காணித்தல்.",
        emp_sub: "உங்கள் நேரடி டெலிமெட்ரி மற்றும் ஷிப்ட் வரலாற்றை ஒரே இடத்தில் பார்க்கவும்.",
        online_personnel: "ஆன்லைன் பணியாளர்கள்",
        syncing_live: "நேரடி ஒத்திசைவு",
        session_history: "அமர்வு வரலாறு",
        audit_sub: "தொழில்முறை முனை செயல்பாட்டின் தணிக்கை",
        date: "தேதி",
        check_in: "வருகை நேரம்",
        check_out: "வெளியேறும் நேரம்",
        total_duration: "மொத்த கால அளவு",
        live: "நேரடி",
        hrs: "மணி",
        no_logs: "கோர் அமைப்பில் தொழில்முறை பதிவுகள் எதுவும் இல்லை.",
        share: "பகிர்",
    },
    bills: BillsText {
        expense_approvals: "செலவு ஒப்புதல்கள்",
        expense_hub: "செலவு மையம்",
        admin_sub: "பணியாளர் செலவினங்களை மதிப்பாய்வு செய்து டிஜிட்டல் ரசீதுகளைச் சரிபார்க்கவும்.",
        emp_sub: "தடையற்ற திருப்பிச் செலுத்துதல் செயலாக்கத்திற்கு உங்கள் வணிக பில்களைச் சமர்ப்பிக்கவும்.",
        new_claim: "புதிய செலவு உரிமை",
        refine_view: "பார்வையைச் செம்மைப்படுத்து",
        process_status: "செயல்முறை நிலை",
        all_transactions: "அனைத்து பரிவர்த்தனைகள்",
        pending_review: "மதிப்பாய்வில் உள்ளது",
        approved: "ஒப்புதல் அளிக்கப்பட்டது",
        rejected: "நிராகரிக்கப்பட்டது",
        category: "செலவு வகை",
        all_categories: "அனைத்து பிரிவுகள்",
        approve: "ஒப்புதல்",
        reject: "நிராகரி",
        no_records: "செலவு பதிவுகள் எதுவும் இல்லை",
        expense_entry: "செலவு உள்ளீடு",
        ai_sub: "ஜெமினி AI தானியங்கி பகுப்பாய்விற்கு ரசீதைப் பதிவேற்றவும்.",
        analyzing: "ஜெமினி AI ரசீதைப் பகுப்பாய்வு செய்கிறது...",
        replace: "படத்தை மாற்றவும்",
        select: "பில் படத்தைத் தேர்ந்தெடு",
        date: "பரிவர்த்தனை தேதி",
        amount: "மொத்த தொகை",
        classification: "வகைப்பாடு",
        description: "சூழல் / விளக்கம்",
        brief: "இந்த செலவிற்கான வணிக நோக்கம்...",
        authorize: "சமர்ப்பிப்பை அங்கீகரிக்கவும்",
        processing: "புத்திசாலித்தனத்தைச் செயலாக்குகிறது...",
        start_date: "தொடக்க தேதி",
        end_date: "முடிவு தேதி",
    },
    users: UsersText {
        title: "பயனர் மேலாண்மை",
        subtitle: "உங்கள் உலகளாவிய பணியாளர்களை நிர்வகிக்கவும் மற்றும் நிறுவன பாத்திரங்களை ஒதுக்கவும்.",
        directory: "பணியாளர் அடைவு",
        add_employee: "ஊழியரைச் சேர்க்கவும்",
        search_placeholder: "பெயர், மின்னஞ்சல் அல்லது பாத்திரம் மூலம் தேடவும்...",
        name: "பெயர்",
        email: "மின்னஞ்சல்",
        designation: "பதவி",
        role: "பாத்திரம்",
        status: "நிலை",
        active: "செயலில்",
        disabled: "மறுக்கப்பட்டது",
        new_employee: "புதிய பணியாளரைப் பதிவுசெய்க",
        form_name: "முழு பெயர்",
        form_email: "வணிக மின்னஞ்சல்",
        form_designation: "முதன்மை பதவி",
        form_mobile: "கைபேசி எண்",
        form_password: "கடவுச்சொல்",
        cancel: "ரத்து செய்",
        confirm: "அடையாளத்தை நிறுவுங்கள்",
        deny: "அணுகலை மறுக்கவும்",
        grant: "அணுகலை வழங்கவும்",
        actions: "செயல்பாடுகள்",
    },
    reports: ReportsText {
        title: "வணிக நுண்ணறிவு",
        subtitle: "நிறுவன செயல்திறன் மற்றும் வரலாறு குறித்த ஆழமான நுண்ணறிவு.",
        expense_trends: "செலவுப் போக்குகள்",
        trends_sub: "மாதாந்திர நிறுவன செலவுகள்",
        month: "மாதம்",
        total: "மொத்தம்",
        audit_trail: "வருகை தணிக்கை பாதை",
        audit_sub: "அனைத்து ஊழியர்களின் வருகை மற்றும் வெளியேறும் நிகழ்வுகளின் முழுமையான பதிவு.",
        search_placeholder: "ஊழியர் பெயர் அல்லது ஐடி மூலம் தேடவும்...",
        personnel: "பணியாளர் விவரங்கள்",
        date: "தேதி",
        check_in: "வருகை",
        check_out: "வெளியேறு",
        location_context: "இருப்பிட சூழல்",
        session_length: "அமர்வு நீளம்",
        active_now: "இப்போது செயலில்",
        no_records: "தரவுத்தளத்தில் பொருந்தும் பதிவுகள் எதுவும் இல்லை",
        hrs: "மணி",
    },
    profile: ProfileText {
        email: "மின்னஞ்சல் முகவரி",
        access_level: "அணுகல் நிலை",
        preferences: "அமைப்பு விருப்பத்தேர்வுகள்",
        language: "மொழி",
        account_session: "கணக்கு அமர்வு",
        session_sub: "வெளியேறுவது உங்கள் தற்போதைய பணியிட அமர்வைப் பாதுகாப்பாக முடிக்கும்.",
        logout: "இப்போது வெளியேறு",
    },
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tables_follow_language() {
        assert_eq!(strings(Language::En).home.start_shift, "Start Shift");
        assert_eq!(strings(Language::Ta).logout, "வெளியேறு");
        assert_eq!(strings(Language::Ta).login.processing, "செயலாக்கம்...");
    }

    #[test]
    fn tamil_table_has_no_blank_labels() {
        let ta = strings(Language::Ta);
        for label in [
            ta.home.otp_required,
            ta.bills.authorize,
            ta.users.grant,
            ta.reports.no_records,
            ta.location.no_logs,
            ta.profile.language,
        ] {
            assert!(!label.trim().is_empty());
        }
    }
}
