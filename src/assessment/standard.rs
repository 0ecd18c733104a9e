// src/assessment/standard.rs

use super::bank::{Difficulty, OptionKey, QuestionRecord};

struct Seed {
    id: u32,
    prompt: &'static str,
    options: [&'static str; 4],
    correct: OptionKey,
    topic: &'static str,
    difficulty: Difficulty,
}

const SEEDS: [Seed; 15] = [
    Seed {
        id: 1,
        prompt: r#"CA GPT Implementation Challenge (Oct 2025)

Your firm has subscribed to CA GPT (ICAI's AI platform) with access to 5000+ annual reports. A partner asks you to use it to analyze whether a potential audit client (listed on NSE, software sector) is experiencing revenue recognition issues. What is the MOST APPROPRIATE use of CA GPT for this task?"#,
        options: [
            r#"Upload client's financial statements directly to CA GPT and get instant fraud detection verdict to present to partner"#,
            r#"Use CA GPT to extract comparable company data, revenue trends, and accounting policies from industry database; then apply professional judgment to identify potential revenue recognition risks"#,
            r#"Use CA GPT to prepare the entire audit risk assessment without further review; trust its analysis"#,
            r#"Don't use CA GPT for listed companies; it's only for small/medium firms"#,
        ],
        correct: OptionKey::B,
        topic: "CA GPT Usage",
        difficulty: Difficulty::Medium,
    },
    Seed {
        id: 2,
        prompt: r#"ChatGPT vs Claude for GST Compliance (Real Oct 2025 Use Case)

Your GST compliance team uses both ChatGPT 4o and Claude 3.5 Sonnet for analyzing GSTR-1 vs GSTR-2B mismatches. After testing both on 20 complex mismatches, you found:
- ChatGPT correctly identifies reason in 85% of cases
- Claude correctly identifies reason in 92% of cases

However, Claude takes 2 minutes longer per analysis. Your team has 500 potential mismatches to review before filing. What is the PRACTICAL recommendation?"#,
        options: [
            r#"Use ChatGPT for all 500 - speed is more important than accuracy"#,
            r#"Use Claude for all 500 - accuracy worth the extra time investment"#,
            r#"Use Claude for complex/high-value mismatches (>₹5 lakhs); ChatGPT for routine ones (<₹1 lakh)"#,
            r#"Hire additional staff instead of using AI - safer option"#,
        ],
        correct: OptionKey::C,
        topic: "Tool Comparison",
        difficulty: Difficulty::Hard,
    },
    Seed {
        id: 3,
        prompt: r#"Prompt Engineering - Real Expense Audit Scenario

You're auditing a consulting firm's expenses (Oct 2025). You want AI to analyze 300 employee expense reports for policy violations. Which prompt would be MOST EFFECTIVE for this real scenario?"#,
        options: [
            r#""Check if expenses are valid""#,
            r#""You are internal audit partner. Review attached 300 expense reports against this policy:
- Flight: Only first class for flights >4 hours (max ₹1,20,000/ticket)
- Hotel: Max ₹12,000/night, 3-star or below
- Meals: ₹800/day per diem, or receipt reimbursement
- Entertainment: Client entertainment ₹5,000/person max

Flag: (1) Policy violations (2) Borderline cases (3) Risk indicators.
Format: Excel-ready table with columns: Employee, Amount, Policy, Violation Type, Recommended Action, Manager""#,
            r#""Analyze expenses and tell me if anything is wrong""#,
            r#""Use machine learning to predict which employees will submit fraudulent expenses""#,
        ],
        correct: OptionKey::B,
        topic: "Prompt Engineering",
        difficulty: Difficulty::Medium,
    },
    Seed {
        id: 4,
        prompt: r#"Reinforcement Learning - Tally Integration Challenge

Your firm has Tally Prime with ODBC enabled. You want to build a system that learns to automatically flag suspicious journal entries. How would reinforcement learning help in this scenario?"#,
        options: [
            r#"Show the system 100 examples of legitimate journal entries and it will reject all others"#,
            r#"The system flags all unusual entries, gets feedback monthly from partner ("This was fraud" or "This was legitimate"), adjusts thresholds quarterly to improve accuracy"#,
            r#"Use past audit findings only; no need for ongoing learning"#,
            r#"This is supervised learning, not reinforcement learning"#,
        ],
        correct: OptionKey::B,
        topic: "Reinforcement Learning",
        difficulty: Difficulty::Hard,
    },
    Seed {
        id: 5,
        prompt: r#"Bias in AI - Real Audit Risk Scenario (Oct 2025)

An AI audit tool, trained on 10 years of firm's audit data, consistently flags "transactions >₹20 lakhs from certain vendors as high-risk" while flagging "transactions >₹50 lakhs from established vendors as low-risk." What is the PRIMARY concern?"#,
        options: [
            r#"The AI is correctly identifying vendor patterns based on historical data"#,
            r#"The AI has learned bias: it underweights materiality for familiar vendors and overweights it for newer vendors - this could miss significant issues"#,
            r#"Vendors don't matter; only transaction amount matters"#,
            r#"This bias is good for efficiency - focus on new vendors only"#,
        ],
        correct: OptionKey::B,
        topic: "AI Bias Detection",
        difficulty: Difficulty::Hard,
    },
    Seed {
        id: 6,
        prompt: r#"Real Month-End Close Automation (Oct 2025)

A CFO of ₹500 cr revenue manufacturing company has this month-end close process:
- Tally exports (manual): 20 min
- Variance analysis: 40 min
- Expense accruals: 30 min
- Manual commenting: 30 min
Total: 120 min/month

Using Tally ODBC + Power BI + ChatGPT API integration, after 2-day setup, what is REALISTIC outcome by month 2?"#,
        options: [
            r#"120 → 30 min (75% reduction) - still needs quality review and judgment"#,
            r#"120 → 10 min (92% reduction) - fully automated, no review needed"#,
            r#"No change - too complex to automate without custom coding"#,
            r#"120 → 60 min (50% reduction) - modest improvement, not worth setup effort"#,
        ],
        correct: OptionKey::A,
        topic: "Automation ROI",
        difficulty: Difficulty::Medium,
    },
    Seed {
        id: 7,
        prompt: r#"Expense Reconciliation - Real Compliance Issue (Oct 2025)

A startup's expense data shows:
- Employee Rakesh submitted 5 hotel bills from "Hotel Paradise" at exactly ₹12,000/night for 20 consecutive days
- Policy allows ₹12,000/night max
- All within policy technically
- But statistically, staying in same 3-star hotel for 20 days at EXACTLY policy limit is highly unusual

What should an AI auditing tool flag here?"#,
        options: [
            r#"No issue - all within policy limits"#,
            r#""SUSPICIOUS PATTERN: Consistent exact-limit compliance across 20 days suggests potential fabrication of expenses. Recommend: (1) Verify hotel receipts and stay dates (2) Check travel project dates (3) Review employee's travel pattern""#,
            r#"Approve all 20 days - employee is budget-conscious"#,
            r#"Flag only if even ONE day exceeds policy"#,
        ],
        correct: OptionKey::B,
        topic: "Anomaly Detection",
        difficulty: Difficulty::Medium,
    },
    Seed {
        id: 8,
        prompt: r#"AI for Month-End Accruals - Real Scenario

A ₹200 cr IT services company has complex accruals: employee bonuses (variable), warranty provisions (estimated), project revenue adjustments (percentage complete method). CFO currently spends 6 hours monthly calculating these accruals.

Using Tally database + ODBC connection to AI (ChatGPT with Excel), what is MOST REALISTIC for automation?"#,
        options: [
            r#"100% automation - AI calculates all accruals without human review"#,
            r#"70-80% automation - AI extracts data, calculates, suggests accruals; CFO reviews/approves in 1.5 hours"#,
            r#"30% automation - AI helps with data organization only"#,
            r#"No automation possible - too complex and judgment-based"#,
        ],
        correct: OptionKey::B,
        topic: "Complex Accounting Automation",
        difficulty: Difficulty::Hard,
    },
    Seed {
        id: 9,
        prompt: r#"Real Anomaly in Financial Data (Oct 2025)

Audit of Fintech startup "PayQuick Ltd" (FY 2024-25):
- Monthly revenue Oct-Dec 2024: ₹8cr, ₹8.5cr, ₹9cr (steady)
- January 2025: ₹22cr (145% jump)
- Feb-Mar 2025: ₹9.5cr, ₹10cr (back to normal)

Company claims "January was product launch month in new market (Singapore)". Management has provided:
- ₹22cr revenue from 3 Singapore customers
- Singapore customer PAN numbers (seems odd for foreign customers)
- No documentation of market research, customer negotiations, or product adaptation costs

As auditor using AI for anomaly detection, what is your NEXT step?"#,
        options: [
            r#"Accept explanation - this is normal in fintech startup; approve revenue"#,
            r#"Flag for investigation: "Large one-time revenue from new market; verify: (1) Customer legitimacy (are these real entities or related parties?) (2) Performance obligations (what was delivered?) (3) Collection (has payment been received?) (4) Why no repeat in Feb?""#,
            r#"Reject revenue - startups can't have such large deals"#,
            r#"This isn't an audit issue; focus on other areas"#,
        ],
        correct: OptionKey::B,
        topic: "Revenue Anomaly",
        difficulty: Difficulty::Hard,
    },
    Seed {
        id: 10,
        prompt: r#"GST Compliance Automation (Current Rules 2025)

Your firm audits a ₹150cr distributor with operations in Maharashtra, Gujarat, Tamil Nadu, Delhi. GST compliance check currently takes 40 hours/month (GSTR-1 vs GSTR-2B vs sales register reconciliation).

Using Power BI + Tally ODBC + ChatGPT for GST analysis, what's realistic timeline for implementation?"#,
        options: [
            r#"Week 1: Connect Tally ODBC to Power BI; Week 2: Build GST reconciliation dashboard; Week 3: AI prompts for compliance analysis
Result: 40 hours → 8-10 hours/month (75% reduction)"#,
            r#"Week 1-2: Build automated reconciliation; Week 3: Train team
Result: 40 hours → 15-20 hours/month (60% reduction) for first month"#,
            r#"Day 1: Connect; Day 2-7: Testing; Week 2: Go-live
Result: 40 hours → 2-3 hours/month (95% reduction)"#,
            r#"Too complex; manual process more reliable"#,
        ],
        correct: OptionKey::A,
        topic: "GST Automation",
        difficulty: Difficulty::Hard,
    },
    Seed {
        id: 11,
        prompt: r#"Transfer Pricing in Digital Economy (Oct 2025 Current Issue)

Your client "CloudServe India" (IT services) has this structure:
- India entity: Develops software (costs ₹50 lakhs)
- US entity (Delaware corp): Sells to US customers as SaaS (charges $10,000/month × 50 customers = ₹40+ crore annual revenue)
- TP arrangement: India charges US entity ₹50 lakhs annually for development + support

Income Tax Department challenges this TP (says underpriced). What should AI-assisted TP analysis focus on?"#,
        options: [
            r#"Accept current TP; no need to adjust"#,
            r#"Analyze: (1) What do comparable IT companies charge for similar SaaS development? (Benchmarking) (2) What % of US revenue should India entity receive for its contribution? (Economic analysis) (3) What functions does India entity perform vs US entity? (FAR analysis) (4) Is TP defensible under Indian TP rules?"#,
            r#"Just increase India's charge to ₹2 crore to be safe"#,
            r#"Don't engage with IT Dept; dispute everything"#,
        ],
        correct: OptionKey::B,
        topic: "Transfer Pricing",
        difficulty: Difficulty::Hard,
    },
    Seed {
        id: 12,
        prompt: r#"Going Concern Assessment - Real Scenario (Oct 2025)

Manufacturing company "SteelTech Ltd" audit:
- Revenue FY24: ₹200cr; FY25: ₹180cr (declining)
- Net loss FY25: ₹20cr (vs ₹15cr profit prior year)
- Bank balance: ₹5cr (down from ₹50cr)
- Debt due in 12 months: ₹80cr
- Current ratio: 0.4

BUT: Management has obtained:
- Letter of credit from Development Bank for ₹60cr (to refinance debt)
- New order from Govt of India for ₹150cr (contract signed, 2-year delivery)

What is the CORRECT audit opinion approach?"#,
        options: [
            r#"Adverse opinion - company clearly insolvent"#,
            r#"Unqualified opinion with Emphasis of Matter paragraph: "Going concern depends on loan refinancing and Govt contract execution. These are contingencies with execution risk. Management has disclosed this. Auditor satisfied with disclosure.""#,
            r#"Qualified opinion - too much uncertainty"#,
            r#"No going concern issue - Govt orders are guaranteed"#,
        ],
        correct: OptionKey::B,
        topic: "Going Concern",
        difficulty: Difficulty::Hard,
    },
    Seed {
        id: 13,
        prompt: r#"Bank Reconciliation - Automation with ODBC (Oct 2025)

Your firm uses Tally + Power BI ODBC automation for monthly bank reconciliation of 3 bank accounts (company has ₹500cr+ cash).

Automated system flags:
- ₹50 lakhs: Bank transfer from unknown entity dated 30th Sept, marked as "investment income" but not requested by company
- Settlement clearing in bank statement for transaction posted in Tally but dated 3 months ago

What is CORRECT audit action?"#,
        options: [
            r#"Ignore - reconciliation matches; no further testing needed"#,
            r#"Investigate BOTH: (1) Is ₹50 lakh receipt legitimate or fraudulent? (2) Why 3-month delay in settlement? Could indicate backdated transaction or manipulation. Require management explanation + supporting documentation."#,
            r#"Approve reconciliation - computer says it matches"#,
            r#"These are timing differences; routine"#,
        ],
        correct: OptionKey::B,
        topic: "Bank Reconciliation Automation",
        difficulty: Difficulty::Hard,
    },
    Seed {
        id: 14,
        prompt: r#"Data Security Breach Scenario (Real Oct 2025 Risk)

You're using ChatGPT to analyze a client's expense dataset for variance analysis. You paste the following:

"Employees with highest expenses: Rajesh (CEO) ₹45,00,000 (includes 10 international trips, 5-star hotels, first-class flights), Priya (CFO) ₹22,00,000, Amit (CTO) ₹18,00,000. Total 50 employees, total spend ₹3,50,00,000..."

What is the PROFESSIONAL ERROR here?"#,
        options: [
            r#"None - this is aggregate data"#,
            r#"You've identified specific individuals (Rajesh, Priya, Amit) by name, function, and amounts. This is CONFIDENTIAL client information. Even ChatGPT's free version may use inputs for training. BREACH."#,
            r#"Using ChatGPT for any client analysis is fine; this is normal practice"#,
            r#"Only problem if you used paste the ENTIRE report, not summary"#,
        ],
        correct: OptionKey::B,
        topic: "Data Security",
        difficulty: Difficulty::Medium,
    },
    Seed {
        id: 15,
        prompt: r#"AI Hallucination - Real Tax Scenario (Oct 2025)

A client asks you: "Can we claim 100% deduction for consulting fees paid to Group's Singapore entity under Section 37(1)?"

Using ChatGPT, you get response: "Yes, Section 37(1) allows 100% deduction for ordinary and necessary business expenses, including consulting fees to related entities. Singapore entity should issue invoice."

Before advising the client, you verify this with:
- Current Income Tax Act Section 37(1) [actual rule]
- Section 40A (Transfer Pricing compliance required for related party payments)
- Section 92 (Actual TP study required for payments >₹5 cr)

What do you discover?"#,
        options: [
            r#"ChatGPT was correct - 100% deduction allowed"#,
            r#"ChatGPT hallucinated: While Section 37(1) allows deduction, it requires:
   - Invoice on proper letterhead with tax ID
   - Transfer pricing documentation (Section 92)
   - TP study proving it's arm's length rate
   - NO automatic 100% deduction without these"#,
            r#"Deduction is denied - can't pay related parties"#,
            r#"This is too complex for AI; don't use AI for tax"#,
        ],
        correct: OptionKey::B,
        topic: "AI Hallucination",
        difficulty: Difficulty::Hard,
    },
];

pub(super) fn questions() -> Vec<QuestionRecord> {
    SEEDS
        .iter()
        .map(|s| QuestionRecord {
            id: s.id,
            prompt: s.prompt.to_string(),
            options: s.options.map(str::to_string),
            correct: s.correct,
            topic: s.topic.to_string(),
            difficulty: s.difficulty,
        })
        .collect()
}
