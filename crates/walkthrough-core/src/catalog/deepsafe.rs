//! Built-in DeepSafe dashboard tour.

use crate::models::{CompletionMetrics, Hotspot, HotspotKind, ModalContent, Step, StepKind};

fn anchor(key: &str) -> String {
    format!("[data-walkthrough=\"{key}\"]")
}

fn step(id: u32, name: &str, phase: &str, kind: StepKind, route: &str, duration_secs: u32) -> Step {
    Step {
        id,
        name: name.to_string(),
        phase: phase.to_string(),
        kind,
        route: route.to_string(),
        duration_secs,
        instruction: None,
        focus_element: None,
        trigger_element: None,
        hotspots: Vec::new(),
        modal: None,
        accepts_route: None,
        advance_on_route: None,
    }
}

fn hotspot(id: &str, kind: HotspotKind, key: &str, tooltip: &str, modal: ModalContent) -> Hotspot {
    Hotspot {
        id: id.to_string(),
        kind,
        anchor: anchor(key),
        tooltip: tooltip.to_string(),
        offset_x: 0.0,
        offset_y: 0.0,
        side: None,
        modal: Some(modal),
    }
}

fn instructed(mut step: Step, instruction: &str) -> Step {
    step.instruction = Some(instruction.to_string());
    step
}

fn focused(mut step: Step, key: &str) -> Step {
    step.focus_element = Some(anchor(key));
    step
}

#[allow(clippy::too_many_lines)]
pub(super) fn steps() -> Vec<Step> {
    use HotspotKind::{Action, Data, Info};
    use StepKind::{ElementFocus, FullPage, Modal, Navigation};

    const INTRO: &str = "Introduction";
    const METRICS: &str = "Dashboard Metrics";
    const MEETINGS: &str = "Meeting Analysis";
    const PARTICIPANTS: &str = "Participant Intelligence";
    const CUSTOMIZATION: &str = "Customization";
    const COMPLETION: &str = "Completion";

    let mut welcome = step(1, "Welcome to DeepSafe", INTRO, Modal, "/app/dashboard", 0);
    welcome.modal = Some(
        ModalContent::new(
            "Welcome to DeepSafe Dashboard",
            "Learn how to monitor and protect your organization from deepfake attacks with this interactive walkthrough.",
        )
        .with_features([
            "Interactive guided tour",
            "Hands-on exploration of features",
            "Takes approximately 5-7 minutes",
        ]),
    );

    let mut overview = instructed(
        step(2, "Dashboard Overview", INTRO, FullPage, "/app/dashboard", 15),
        "This is your security command center. Click on the hotspots to learn more about each area.",
    );
    overview.hotspots = vec![
        hotspot("header-nav", Info, "header", "Navigate between dashboard sections",
            ModalContent::new("Navigation", "Use the header navigation to switch between Overview, Meeting History, and Participant History. The theme toggle lets you switch between dark and light modes.")),
        hotspot("metrics-area", Data, "metrics", "Key security metrics at a glance",
            ModalContent::new("Security Metrics", "These cards show your organization's security posture at a glance: meetings monitored, compromised meetings detected, and money protected from fraud.")),
        hotspot("chart-area", Info, "chart", "Track risk trends over time",
            ModalContent::new("Risk Trend Analysis", "This chart shows your average risk score over time. Red markers indicate critical alerts. The threshold lines show warning (60%) and critical (85%) levels.")),
    ];

    let mut security_metrics = focused(
        instructed(
            step(3, "Security Metrics", METRICS, ElementFocus, "/app/dashboard", 18),
            "Click on any metric card to explore. Each card is interactive and shows trends.",
        ),
        "metrics",
    );
    security_metrics.hotspots = vec![
        hotspot("total-meetings", Data, "metric-total-meetings", "Total meetings monitored",
            ModalContent::new("Total Meetings", "Shows the total number of video meetings analyzed by DeepSafe. The trend indicator shows the change compared to the previous period.")),
        hotspot("compromised", Action, "metric-compromised", "Compromised meetings detected",
            ModalContent::new("Compromised Meetings", "Meetings where deepfake or social engineering attacks were detected. Any number above zero requires immediate attention.")
                .with_features(["Click to view all high-risk meetings", "Filter by severity level"])),
        hotspot("money-protected", Info, "metric-money", "Financial losses prevented",
            ModalContent::new("Money Protected", "The total amount of financial losses prevented by detecting and stopping fraudulent requests during compromised meetings.")),
    ];

    let mut risk_trend = focused(
        instructed(
            step(4, "Risk Trend Analysis", METRICS, ElementFocus, "/app/dashboard", 15),
            "Hover over the chart to see daily risk scores and alert counts.",
        ),
        "chart",
    );
    risk_trend.hotspots = vec![hotspot(
        "chart-line", Data, "chart", "Interactive risk trend chart",
        ModalContent::new("Understanding Risk Trends", "The blue line shows your average daily risk score. Higher scores indicate more suspicious activity detected.")
            .with_features([
                "Hover for detailed daily breakdown",
                "Red dots mark critical alerts",
                "Yellow threshold = Warning (60%)",
                "Red threshold = Critical (85%)",
            ]),
    )];

    let mut incidents = focused(
        instructed(
            step(5, "Recent Incidents", METRICS, ElementFocus, "/app/dashboard", 12),
            "Click an incident to view full forensic details.",
        ),
        "incidents",
    );
    incidents.hotspots = vec![hotspot(
        "incident-list", Action, "incidents", "Recent high-risk incidents",
        ModalContent::new("Recent Incidents", "Shows the most recent security incidents detected across your meetings, with risk score, attack type and resolution status.")
            .with_features([
                "Click any incident to see full details",
                "View forensic evidence and timeline",
                "Track investigation status",
            ]),
    )];

    let mut meeting_history = instructed(
        step(6, "Meeting History", MEETINGS, Navigation, "/app/meetings", 10),
        "Click \"Meeting History\" in the navigation to explore all analyzed meetings.",
    );
    meeting_history.trigger_element = Some(anchor("nav-meetings"));
    meeting_history.hotspots = vec![hotspot(
        "meetings-nav", Action, "nav-meetings", "Go to Meeting History",
        ModalContent::new("Meeting History", "The Meeting History page shows all meetings analyzed by DeepSafe. You can filter, sort, and search through your meeting records."),
    )];

    let mut explore_meetings = focused(
        instructed(
            step(7, "Explore Meetings", MEETINGS, ElementFocus, "/app/meetings", 18),
            "Try the filters to narrow down meetings. Click a high-risk meeting to see forensic details.",
        ),
        "meetings-table",
    );
    explore_meetings.advance_on_route = Some("/app/meetings/*".to_string());
    explore_meetings.hotspots = vec![
        hotspot("filter-risk", Info, "filter-risk", "Filter by risk level",
            ModalContent::new("Risk Filters", "Filter meetings by risk category: Critical (86-100%), High (61-85%), Medium (31-60%), or Low (0-30%).")),
        hotspot("search-meetings", Info, "search-meetings", "Search by meeting name or ID",
            ModalContent::new("Search Meetings", "Quickly find specific meetings by searching for meeting names, IDs, or participant names.")),
        hotspot("meeting-row", Action, "meeting-row-0", "Click to view meeting details",
            ModalContent::new("Meeting Row", "Each row shows a meeting's risk score, category, date, and status. Rows highlighted in red need attention.")
                .with_features(["Click any row to see full details", "View transcript and forensic evidence"])),
    ];

    let mut meeting_analysis = instructed(
        step(8, "Meeting Analysis", MEETINGS, FullPage, "/app/meetings/mtg-001", 25),
        "Explore the tabs to see transcript, participants, and forensic evidence.",
    );
    meeting_analysis.accepts_route = Some("/app/meetings/*".to_string());
    meeting_analysis.hotspots = vec![
        hotspot("meeting-tabs", Info, "meeting-tabs", "Navigate between meeting sections",
            ModalContent::new("Meeting Detail Tabs", "Each meeting has 5 tabs: Overview, Transcript, Participants, Forensics, and Actions.")),
        hotspot("risk-score", Data, "risk-score", "Overall meeting risk assessment",
            ModalContent::new("Risk Assessment", "The overall risk score combines video analysis (40%), audio analysis (30%), behavioral analysis (20%), and network analysis (10%).")),
        hotspot("timeline", Info, "timeline", "Threat detection timeline",
            ModalContent::new("Detection Timeline", "Shows the sequence of events from meeting start to incident resolution.")),
        hotspot("forensics-tab", Action, "tab-forensics", "View forensic evidence",
            ModalContent::new("Forensic Analysis", "The Forensics tab shows detailed evidence: deepfake confidence scores, voice cloning detection, network anomalies, and behavioral analysis.")
                .with_features([
                    "Video: Facial landmarks, micro-expressions",
                    "Audio: Voice fingerprinting, spectral analysis",
                    "Network: VPN detection, virtual cameras",
                    "Behavioral: Social engineering patterns",
                ])),
    ];

    let mut participants_page = instructed(
        step(9, "Participants Page", PARTICIPANTS, Navigation, "/app/participants", 10),
        "Click \"Participant History\" to view all meeting participants.",
    );
    participants_page.trigger_element = Some(anchor("nav-participants"));
    participants_page.hotspots = vec![hotspot(
        "participants-nav", Action, "nav-participants", "Go to Participant History",
        ModalContent::new("Participant History", "Track all individuals who have joined your meetings. Monitor their risk scores, verify identities, and flag suspicious participants."),
    )];

    let mut participant_table = focused(
        instructed(
            step(10, "Participant Table", PARTICIPANTS, ElementFocus, "/app/participants", 18),
            "Notice the status badges and risk scores. Click a participant for their full profile.",
        ),
        "participants-table",
    );
    participant_table.advance_on_route = Some("/app/participants/*".to_string());
    participant_table.hotspots = vec![
        hotspot("status-filter", Info, "filter-status", "Filter by verification status",
            ModalContent::new("Participant Status", "Participants can be Verified, Flagged, Blacklisted, External, or Guest.")),
        hotspot("participant-row", Action, "participant-row-0", "View participant profile",
            ModalContent::new("Participant Row", "Each row shows the participant's risk score, number of meetings, incident count, and last seen date.")),
    ];

    let mut participant_profile = instructed(
        step(11, "Participant Profile", PARTICIPANTS, FullPage, "/app/participants/participant-002", 20),
        "Review threat intelligence and verification details.",
    );
    participant_profile.accepts_route = Some("/app/participants/*".to_string());
    participant_profile.hotspots = vec![
        hotspot("risk-panel", Data, "risk-panel", "Risk assessment summary",
            ModalContent::new("Risk Assessment", "Shows the participant's overall risk score, total meetings attended, incident rate, and trust score.")),
        hotspot("threat-intel", Action, "threat-intel", "Threat intelligence details",
            ModalContent::new("Threat Intelligence", "For flagged or blacklisted participants, this panel shows detection indicators and known attack pattern matches.")
                .with_features([
                    "Detection methods used",
                    "VPN and virtual camera detection",
                    "Social engineering tactics identified",
                    "Attack pattern similarity score",
                ])),
    ];

    let mut settings = instructed(
        step(12, "Settings Tour", CUSTOMIZATION, Navigation, "/app/settings", 10),
        "Open Settings to customize your DeepSafe experience.",
    );
    settings.trigger_element = Some(anchor("nav-settings"));
    settings.hotspots = vec![hotspot(
        "settings-nav", Action, "nav-settings", "Configure your preferences",
        ModalContent::new("Settings", "Customize notification preferences, alert thresholds, integrations, and display preferences."),
    )];

    let mut notifications = focused(
        instructed(
            step(13, "Notification Preferences", CUSTOMIZATION, ElementFocus, "/app/settings", 15),
            "Configure how and when you receive security alerts.",
        ),
        "notifications",
    );
    notifications.hotspots = vec![
        hotspot("alert-threshold", Data, "alert-threshold", "Set alert sensitivity",
            ModalContent::new("Alert Threshold", "Adjust the risk score threshold that triggers alerts. Lower values mean more alerts.")
                .with_features([
                    "40%: Alert on medium+ risk",
                    "60%: Alert on high+ risk",
                    "85%: Alert only on critical",
                ])),
        hotspot("email-notifications", Info, "email-toggles", "Email notification settings",
            ModalContent::new("Email Notifications", "Control which events trigger email notifications: critical incidents, daily summaries, weekly reports, and system updates.")),
    ];

    let mut integrations = focused(
        instructed(
            step(14, "Integrations", CUSTOMIZATION, ElementFocus, "/app/settings", 15),
            "Connect your video platforms for automatic monitoring.",
        ),
        "integrations",
    );
    integrations.hotspots = vec![hotspot(
        "platform-cards", Action, "integrations", "Connect video platforms",
        ModalContent::new("Platform Integrations", "Connect Zoom, Microsoft Teams, Google Meet, and Slack for automatic meeting monitoring.")
            .with_features([
                "One-click OAuth connection",
                "Automatic meeting import",
                "Real-time analysis during calls",
                "Webhook notifications to Slack",
            ]),
    )];

    let mut complete = step(15, "Walkthrough Complete", COMPLETION, Modal, "/app/dashboard", 0);
    let mut summary = ModalContent::new(
        "You're Ready!",
        "Congratulations! You've completed the DeepSafe dashboard walkthrough. You now know how to monitor meetings, analyze threats, and configure your security settings.",
    );
    summary.metrics = Some(CompletionMetrics {
        steps_completed: 14,
        features_explored: 25,
    });
    summary.next_steps = vec![
        "Review your first high-risk meeting".to_string(),
        "Configure your alert thresholds".to_string(),
        "Connect your video platforms".to_string(),
        "Explore participant profiles".to_string(),
    ];
    summary.help_link = Some("/app/support".to_string());
    complete.modal = Some(summary);

    vec![
        welcome,
        overview,
        security_metrics,
        risk_trend,
        incidents,
        meeting_history,
        explore_meetings,
        meeting_analysis,
        participants_page,
        participant_table,
        participant_profile,
        settings,
        notifications,
        integrations,
        complete,
    ]
}
